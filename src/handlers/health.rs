//! 헬스체크 엔드포인트
//!
//! - `GET /health` - 프로세스 생존 여부 (liveness)
//! - `GET /health/ready` - 데이터베이스 연결까지 확인 (readiness)

use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::config::AppSettings;
use crate::core::registry::ServiceRegistry;
use crate::db::Database;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "서비스 동작 중", body = HealthStatus))
)]
#[get("/health")]
pub async fn liveness(registry: web::Data<ServiceRegistry>) -> HttpResponse {
    let service = registry
        .get::<AppSettings>()
        .map(|settings| settings.app_name.clone())
        .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string());

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        service,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "데이터베이스 연결 정상"),
        (status = 503, description = "데이터베이스에 연결할 수 없음")
    )
)]
#[get("/health/ready")]
pub async fn readiness(registry: web::Data<ServiceRegistry>) -> HttpResponse {
    let database = match registry.get::<Database>() {
        Ok(database) => database,
        Err(e) => {
            log::error!("❌ readiness: {}", e);
            return unavailable();
        }
    };

    match database.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ready" })),
        Err(e) => {
            log::warn!("⚠️ readiness: 데이터베이스 ping 실패: {}", e);
            unavailable()
        }
    }
}

fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
}
