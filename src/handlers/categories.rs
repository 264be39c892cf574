//! 카테고리 HTTP 핸들러
//!
//! 모든 엔드포인트는 Bearer 토큰이 필요하며, 변경 요청은 `writer` 역할이 필요합니다.
//!
//! | 메서드 | 경로 | 결과 |
//! |--------|------|------|
//! | GET | `/api/v1/categories` | 200 목록 + `total` |
//! | GET | `/api/v1/categories/{id}` | 200 / 404 |
//! | POST | `/api/v1/categories` | 201 + `Location` / 400 |
//! | PUT | `/api/v1/categories/{id}` | 200 / 400 / 404 |
//! | DELETE | `/api/v1/categories/{id}` | 200 / 400 (상품 존재) / 404 |

use actix_web::{delete, get, post, put, web};
use uuid::Uuid;

use crate::core::errors::AppResult;
use crate::core::registry::Inject;
use crate::domain::dto::catalog::{CategoryRequest, CategoryResponse};
use crate::domain::handlers::catalog::{
    CategoryHandler, CreateCategory, DeleteCategory, GetCategory, ListCategories, UpdateCategory,
};
use crate::domain::handlers::CommandHandler;
use crate::domain::models::{AuthenticatedUser, CommandResult};
use crate::handlers::docs::EnvelopeDoc;

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tags = ["categories"],
    responses(
        (status = 200, description = "이름순 카테고리 목록", body = EnvelopeDoc),
        (status = 401, description = "인증 필요", body = EnvelopeDoc)
    )
)]
#[get("")]
pub async fn list_categories(
    handler: Inject<CategoryHandler>,
) -> AppResult<CommandResult<Vec<CategoryResponse>>> {
    handler.handle(ListCategories).await
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tags = ["categories"],
    params(("id" = Uuid, Path, description = "카테고리 ID")),
    responses(
        (status = 200, description = "카테고리", body = EnvelopeDoc),
        (status = 404, description = "없음", body = EnvelopeDoc)
    )
)]
#[get("/{id}")]
pub async fn get_category(
    handler: Inject<CategoryHandler>,
    id: web::Path<Uuid>,
) -> AppResult<CommandResult<CategoryResponse>> {
    handler.handle(GetCategory { id: id.into_inner() }).await
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tags = ["categories"],
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "생성됨", body = EnvelopeDoc,
            headers(("Location" = String, description = "새 카테고리 경로"))),
        (status = 400, description = "검증 실패 또는 이름 중복", body = EnvelopeDoc),
        (status = 403, description = "writer 역할 필요", body = EnvelopeDoc)
    )
)]
#[post("")]
pub async fn create_category(
    handler: Inject<CategoryHandler>,
    user: AuthenticatedUser,
    payload: web::Json<CategoryRequest>,
) -> AppResult<CommandResult<()>> {
    handler
        .handle(CreateCategory {
            request: payload.into_inner(),
            user_log: user.audit_name().to_string(),
        })
        .await
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tags = ["categories"],
    params(("id" = Uuid, Path, description = "카테고리 ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "수정된 카테고리", body = EnvelopeDoc),
        (status = 400, description = "검증 실패 또는 이름 중복", body = EnvelopeDoc),
        (status = 404, description = "없음", body = EnvelopeDoc)
    )
)]
#[put("/{id}")]
pub async fn update_category(
    handler: Inject<CategoryHandler>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
    payload: web::Json<CategoryRequest>,
) -> AppResult<CommandResult<CategoryResponse>> {
    handler
        .handle(UpdateCategory {
            id: id.into_inner(),
            request: payload.into_inner(),
            user_log: user.audit_name().to_string(),
        })
        .await
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tags = ["categories"],
    params(("id" = Uuid, Path, description = "카테고리 ID")),
    responses(
        (status = 200, description = "삭제됨", body = EnvelopeDoc),
        (status = 400, description = "상품이 남아 있음", body = EnvelopeDoc),
        (status = 404, description = "없음", body = EnvelopeDoc)
    )
)]
#[delete("/{id}")]
pub async fn delete_category(
    handler: Inject<CategoryHandler>,
    id: web::Path<Uuid>,
) -> AppResult<CommandResult<()>> {
    handler.handle(DeleteCategory { id: id.into_inner() }).await
}
