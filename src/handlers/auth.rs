//! 토큰 발급 HTTP 핸들러
//!
//! 클라이언트 자격 증명(client credentials) 방식으로 액세스 토큰을 발급합니다.
//! 이 스코프에는 `auth` Rate Limiting 정책이 적용됩니다.
//!
//! # Endpoint
//! `POST /api/v1/auth/token`
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/auth/token \
//!   -H "Content-Type: application/json" \
//!   -d '{"grant_type":"client_credentials","client_id":"dev-client","client_secret":"dev-secret"}'
//! ```

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::config::AppSettings;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::Inject;
use crate::domain::dto::tokens::{TokenRequest, TokenResponse};
use crate::handlers::docs::EnvelopeDoc;
use crate::services::auth::TokenService;

#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    tags = ["auth"],
    security([]),
    request_body = TokenRequest,
    responses(
        (status = 200, description = "토큰 발급", body = TokenResponse),
        (status = 400, description = "잘못된 요청", body = EnvelopeDoc),
        (status = 401, description = "자격 증명 불일치", body = EnvelopeDoc),
        (status = 429, description = "요청 한도 초과")
    )
)]
#[post("/token")]
pub async fn issue_token(
    settings: Inject<AppSettings>,
    tokens: Inject<TokenService>,
    payload: web::Json<TokenRequest>,
) -> AppResult<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;

    let client = settings
        .find_client(&request.client_id, &request.client_secret)
        .ok_or_else(|| {
            log::warn!("토큰 발급 거부: client_id={}", request.client_id);
            AppError::AuthenticationError("클라이언트 자격 증명이 올바르지 않습니다".to_string())
        })?;

    let token = tokens.issue(&client.client_id, &client.roles)?;
    log::info!("🔑 토큰 발급: client_id={}", client.client_id);

    Ok(HttpResponse::Ok().json(token))
}
