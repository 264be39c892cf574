//! 상품 HTTP 핸들러
//!
//! 목록 조회는 페이지 단위이며 `page`, `size`, `sort`, `desc`, `category_id`, `search`
//! 쿼리 파라미터를 받습니다. 단건 조회는 소속 카테고리를 함께 돌려줍니다.

use actix_web::{delete, get, post, put, web};
use uuid::Uuid;

use crate::core::errors::AppResult;
use crate::core::registry::Inject;
use crate::domain::dto::catalog::{
    ListProductsQuery, ProductBatchRequest, ProductRequest, ProductResponse,
};
use crate::domain::handlers::catalog::{
    CreateProduct, CreateProductsBatch, DeleteProduct, GetProduct, ListProducts, ProductHandler,
    UpdateProduct,
};
use crate::domain::handlers::CommandHandler;
use crate::domain::models::{AuthenticatedUser, CommandResult};
use crate::handlers::docs::EnvelopeDoc;

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tags = ["products"],
    params(ListProductsQuery),
    responses(
        (status = 200, description = "상품 페이지와 전체 건수(`total`)", body = EnvelopeDoc),
        (status = 400, description = "잘못된 페이지 파라미터", body = EnvelopeDoc)
    )
)]
#[get("")]
pub async fn list_products(
    handler: Inject<ProductHandler>,
    query: web::Query<ListProductsQuery>,
) -> AppResult<CommandResult<Vec<ProductResponse>>> {
    handler
        .handle(ListProducts {
            query: query.into_inner(),
        })
        .await
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tags = ["products"],
    params(("id" = Uuid, Path, description = "상품 ID")),
    responses(
        (status = 200, description = "카테고리를 포함한 상품", body = EnvelopeDoc),
        (status = 404, description = "없음", body = EnvelopeDoc)
    )
)]
#[get("/{id}")]
pub async fn get_product(
    handler: Inject<ProductHandler>,
    id: web::Path<Uuid>,
) -> AppResult<CommandResult<ProductResponse>> {
    handler.handle(GetProduct { id: id.into_inner() }).await
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tags = ["products"],
    request_body = ProductRequest,
    responses(
        (status = 201, description = "생성됨", body = EnvelopeDoc,
            headers(("Location" = String, description = "새 상품 경로"))),
        (status = 400, description = "검증 실패 또는 존재하지 않는 카테고리", body = EnvelopeDoc)
    )
)]
#[post("")]
pub async fn create_product(
    handler: Inject<ProductHandler>,
    user: AuthenticatedUser,
    payload: web::Json<ProductRequest>,
) -> AppResult<CommandResult<()>> {
    handler
        .handle(CreateProduct {
            request: payload.into_inner(),
            user_log: user.audit_name().to_string(),
        })
        .await
}

#[utoipa::path(
    post,
    path = "/api/v1/products/batch",
    tags = ["products"],
    request_body = ProductBatchRequest,
    responses(
        (status = 200, description = "생성된 상품 ID 목록", body = EnvelopeDoc),
        (status = 400, description = "검증 실패 또는 존재하지 않는 카테고리", body = EnvelopeDoc)
    )
)]
#[post("/batch")]
pub async fn create_products_batch(
    handler: Inject<ProductHandler>,
    user: AuthenticatedUser,
    payload: web::Json<ProductBatchRequest>,
) -> AppResult<CommandResult<Vec<Uuid>>> {
    handler
        .handle(CreateProductsBatch {
            request: payload.into_inner(),
            user_log: user.audit_name().to_string(),
        })
        .await
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tags = ["products"],
    params(("id" = Uuid, Path, description = "상품 ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "수정된 상품", body = EnvelopeDoc),
        (status = 400, description = "검증 실패", body = EnvelopeDoc),
        (status = 404, description = "없음", body = EnvelopeDoc)
    )
)]
#[put("/{id}")]
pub async fn update_product(
    handler: Inject<ProductHandler>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
    payload: web::Json<ProductRequest>,
) -> AppResult<CommandResult<ProductResponse>> {
    handler
        .handle(UpdateProduct {
            id: id.into_inner(),
            request: payload.into_inner(),
            user_log: user.audit_name().to_string(),
        })
        .await
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tags = ["products"],
    params(("id" = Uuid, Path, description = "상품 ID")),
    responses(
        (status = 200, description = "삭제됨", body = EnvelopeDoc),
        (status = 404, description = "없음", body = EnvelopeDoc)
    )
)]
#[delete("/{id}")]
pub async fn delete_product(
    handler: Inject<ProductHandler>,
    id: web::Path<Uuid>,
) -> AppResult<CommandResult<()>> {
    handler.handle(DeleteProduct { id: id.into_inner() }).await
}
