//! # Data Transfer Objects (DTOs)
//!
//! HTTP 계층과 도메인 계층 사이에서 데이터를 주고받는 타입들입니다.
//! 엔티티를 그대로 노출하지 않고, 요청 검증(`validator`)과
//! OpenAPI 스키마(`utoipa`)를 DTO에서 선언합니다.
//!
//! ## 구조
//!
//! ```text
//! dto/
//! ├── catalog/   # 카테고리, 상품
//! │   ├── request.rs
//! │   └── response.rs
//! └── tokens/    # 클라이언트 자격 증명 토큰
//!     ├── request.rs
//!     └── response.rs
//! ```
//!
//! ## 규칙
//!
//! - 요청/응답 본문 필드는 camelCase (토큰 엔드포인트는 OAuth 관례에 따라 snake_case)
//! - 목록 조회 쿼리 문자열은 snake_case
//! - 검증 메시지는 사용자에게 그대로 노출되므로 내부 정보를 담지 않습니다.

pub mod catalog;

pub mod tokens {
    pub mod request;
    pub mod response;

    pub use request::TokenRequest;
    pub use response::TokenResponse;
}

pub use catalog::{
    CategoryRequest, CategoryResponse, ListProductsQuery, ProductBatchRequest, ProductRequest,
    ProductResponse, ProductSortKey,
};
pub use tokens::{TokenRequest, TokenResponse};
