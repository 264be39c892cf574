//! 카탈로그 커맨드
//!
//! 변경 커맨드는 감사 로그에 남길 호출 주체(`user_log`)를 함께 전달합니다.

use uuid::Uuid;

use crate::domain::dto::catalog::{
    CategoryRequest, ListProductsQuery, ProductBatchRequest, ProductRequest,
};

#[derive(Debug, Clone)]
pub struct ListCategories;

#[derive(Debug, Clone)]
pub struct GetCategory {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub request: CategoryRequest,
    pub user_log: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub id: Uuid,
    pub request: CategoryRequest,
    pub user_log: String,
}

#[derive(Debug, Clone)]
pub struct DeleteCategory {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListProducts {
    pub query: ListProductsQuery,
}

#[derive(Debug, Clone)]
pub struct GetProduct {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub request: ProductRequest,
    pub user_log: String,
}

#[derive(Debug, Clone)]
pub struct CreateProductsBatch {
    pub request: ProductBatchRequest,
    pub user_log: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub id: Uuid,
    pub request: ProductRequest,
    pub user_log: String,
}

#[derive(Debug, Clone)]
pub struct DeleteProduct {
    pub id: Uuid,
}
