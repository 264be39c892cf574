//! 카탈로그 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::entities::catalog::{category, product};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_log: String,
    pub updated_at: DateTime<Utc>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            user_log: model.user_log,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub user_log: String,
    pub updated_at: DateTime<Utc>,
    /// `category` include로 조회한 경우에만 포함됩니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            price_cents: model.price_cents,
            user_log: model.user_log,
            updated_at: model.updated_at,
            category: model.category.map(CategoryResponse::from),
        }
    }
}
