//! 카탈로그 요청 DTO
//!
//! 요청 본문은 camelCase, 목록 조회 쿼리 문자열은 snake_case를 사용합니다.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 카테고리 생성/수정 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// 카테고리 이름 (1-100자)
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    /// 설명 (최대 500자)
    #[validate(length(max = 500, message = "설명은 500자 이하여야 합니다"))]
    pub description: Option<String>,
}

/// 상품 생성/수정 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub category_id: Uuid,

    /// 상품 이름 (1-200자)
    #[validate(length(min = 1, max = 200, message = "이름은 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    /// 가격 (최소 화폐 단위)
    #[validate(range(min = 0, message = "가격은 0 이상이어야 합니다"))]
    pub price_cents: i64,
}

/// 상품 일괄 생성 요청 (1-100건)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductBatchRequest {
    #[validate(length(min = 1, max = 100, message = "1-100개의 상품이 필요합니다"), nested)]
    pub items: Vec<ProductRequest>,
}

/// 상품 정렬 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortKey {
    #[default]
    Name,
    Price,
    UpdatedAt,
}

/// 상품 목록 조회 쿼리
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// 페이지 번호 (1-1000000, 기본값 1)
    #[validate(range(min = 1, max = 1_000_000, message = "페이지는 1-1000000 사이여야 합니다"))]
    pub page: Option<u64>,

    /// 페이지 크기 (1-100, 기본값 20)
    #[validate(range(min = 1, max = 100, message = "페이지 크기는 1-100 사이여야 합니다"))]
    pub size: Option<u64>,

    /// 정렬 키 (기본값 name)
    #[param(inline)]
    pub sort: Option<ProductSortKey>,

    /// 내림차순 여부
    pub desc: Option<bool>,

    /// 카테고리 필터
    pub category_id: Option<Uuid>,

    /// 이름 부분 일치 검색
    #[validate(length(max = 100, message = "검색어는 100자 이하여야 합니다"))]
    pub search: Option<String>,
}

impl ListProductsQuery {
    pub const DEFAULT_PAGE_SIZE: u64 = 20;

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn size(&self) -> u64 {
        self.size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("공백만 입력할 수 없습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_request_validation() {
        let valid = CategoryRequest {
            name: "Books".to_string(),
            description: None,
        };
        assert!(valid.validate().is_ok());

        let blank = CategoryRequest {
            name: "   ".to_string(),
            description: None,
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_product_request_rejects_negative_price() {
        let request = ProductRequest {
            category_id: Uuid::new_v4(),
            name: "Pen".to_string(),
            price_cents: -1,
        };

        assert!(request.validate().unwrap_err().field_errors().contains_key("price_cents"));
    }

    #[test]
    fn test_batch_request_requires_items() {
        let empty = ProductBatchRequest { items: vec![] };

        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_product_request_uses_camel_case() {
        let json = serde_json::json!({
            "categoryId": Uuid::nil(),
            "name": "Pen",
            "priceCents": 150
        });
        let request: ProductRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.price_cents, 150);
    }

    #[test]
    fn test_list_query_defaults_and_limits() {
        let query = ListProductsQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.size(), ListProductsQuery::DEFAULT_PAGE_SIZE);
        assert!(query.validate().is_ok());

        let invalid = ListProductsQuery {
            page: Some(0),
            size: Some(500),
            ..Default::default()
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
        assert!(errors.field_errors().contains_key("size"));

        let huge_page = ListProductsQuery {
            page: Some(100_000_000_000_000_000),
            ..Default::default()
        };
        assert!(huge_page.validate().unwrap_err().field_errors().contains_key("page"));
    }
}
