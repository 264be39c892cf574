//! OpenAPI 문서 구성
//!
//! [`ApiDoc`]이 모든 HTTP 엔드포인트와 DTO 스키마를 모읍니다.
//! 문서가 활성화되면 `/swagger/v1/swagger.json`에 JSON 문서를,
//! `/swagger/`에 Swagger UI를 노출합니다.

use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::dto::catalog::{
    CategoryRequest, CategoryResponse, ProductBatchRequest, ProductRequest, ProductResponse,
    ProductSortKey,
};
use crate::domain::dto::tokens::{TokenRequest, TokenResponse};
use crate::handlers::health::HealthStatus;

pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

/// 표준 결과 엔벨로프의 문서용 스키마
///
/// 실제 응답은 [`crate::domain::models::ResultEnvelope`]로 직렬화되며,
/// `data`의 형태는 엔드포인트마다 다릅니다.
#[derive(Serialize, ToSchema)]
#[schema(as = ResultEnvelope)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDoc {
    /// 생성된 리소스 ID (201)
    pub id: Option<String>,
    /// 페이지네이션을 무시한 전체 건수
    pub total: Option<u64>,
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    /// 서버 오류 상관관계 ID (500)
    pub error_id: Option<String>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

/// Bearer JWT 보안 스키마를 추가합니다.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("POST /api/v1/auth/token 으로 발급받은 액세스 토큰"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "API Starter Backend",
        description = "카탈로그 예제 도메인을 포함한 Web API 스타터"
    ),
    security(("bearerAuth" = [])),
    paths(
        crate::handlers::health::liveness,
        crate::handlers::health::readiness,
        crate::handlers::auth::issue_token,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::create_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::create_products_batch,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
    ),
    components(schemas(
        EnvelopeDoc,
        HealthStatus,
        TokenRequest,
        TokenResponse,
        CategoryRequest,
        CategoryResponse,
        ProductRequest,
        ProductBatchRequest,
        ProductResponse,
        ProductSortKey,
    )),
    tags(
        (name = "health", description = "헬스체크"),
        (name = "auth", description = "토큰 발급"),
        (name = "categories", description = "카테고리 관리"),
        (name = "products", description = "상품 관리")
    )
)]
pub struct ApiDoc;

/// Swagger UI와 OpenAPI JSON 엔드포인트를 등록합니다.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/swagger/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi()));
}
