//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고 호출 주체를 추출합니다.
//! 조회(GET/HEAD/OPTIONS)와 변경(POST/PUT/PATCH/DELETE)에 서로 다른 역할을
//! 요구할 수 있습니다.
//!
//! ```rust,ignore
//! web::scope("/api/v1/products")
//!     .wrap(AuthMiddleware::required_with_roles(vec!["reader", "writer"]).writes_require("writer"))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    mode: AuthMode,
    /// 모든 요청에 필요한 역할
    required_role: Option<RequiredRole>,
    /// 변경 요청에 추가로 필요한 역할
    write_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            write_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            required_role: Some(required_role),
            ..Self::new(mode)
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 복수 역할 중 하나 요구 인증 미들웨어 생성
    pub fn required_with_roles(roles: Vec<&str>) -> Self {
        let role_strings: Vec<String> = roles.into_iter().map(str::to_string).collect();
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(role_strings))
    }

    /// 변경 메서드(POST/PUT/PATCH/DELETE)에 필요한 역할을 지정합니다.
    pub fn writes_require(mut self, role: &str) -> Self {
        self.write_role = Some(RequiredRole::Single(role.to_string()));
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
            write_role: self.write_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::config::JwtSettings;
    use crate::core::registry::ServiceRegistry;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::TokenService;

    fn token_service() -> TokenService {
        TokenService::new(JwtSettings {
            secret: "middleware-secret".to_string(),
            issuer: "api-starter".to_string(),
            audience: "api-starter-clients".to_string(),
            expiration_minutes: 5,
        })
    }

    fn registry() -> web::Data<ServiceRegistry> {
        let mut builder = ServiceRegistry::builder();
        builder.singleton(Arc::new(token_service()));
        web::Data::new(builder.build())
    }

    fn bearer(roles: &[&str]) -> (&'static str, String) {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        let token = token_service().issue("client", &roles).unwrap();
        ("Authorization", format!("Bearer {}", token.access_token))
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.subject)
    }

    macro_rules! app {
        ($middleware:expr) => {
            test::init_service(
                App::new().app_data(registry()).service(
                    web::scope("/items")
                        .wrap($middleware)
                        .route("", web::get().to(whoami))
                        .route("", web::post().to(whoami)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = app!(AuthMiddleware::required());

        let res = test::call_service(&app, test::TestRequest::get().uri("/items").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let app = app!(AuthMiddleware::required());

        let req = test::TestRequest::get()
            .uri("/items")
            .insert_header(bearer(&["reader"]))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "client");
    }

    #[actix_web::test]
    async fn test_writes_require_writer_role() {
        let app = app!(AuthMiddleware::required_with_roles(vec!["reader", "writer"])
            .writes_require("writer"));

        let read = test::TestRequest::get()
            .uri("/items")
            .insert_header(bearer(&["reader"]))
            .to_request();
        assert_eq!(test::call_service(&app, read).await.status(), StatusCode::OK);

        let write = test::TestRequest::post()
            .uri("/items")
            .insert_header(bearer(&["reader"]))
            .to_request();
        assert_eq!(test::call_service(&app, write).await.status(), StatusCode::FORBIDDEN);

        let writer = test::TestRequest::post()
            .uri("/items")
            .insert_header(bearer(&["writer"]))
            .to_request();
        assert_eq!(test::call_service(&app, writer).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_role_outside_allowed_set_is_forbidden() {
        let app = app!(AuthMiddleware::required_with_roles(vec!["reader", "writer"]));

        let req = test::TestRequest::get()
            .uri("/items")
            .insert_header(bearer(&["auditor"]))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_optional_mode_allows_anonymous() {
        let app = test::init_service(
            App::new().app_data(registry()).service(
                web::scope("/open")
                    .wrap(AuthMiddleware::optional())
                    .route("", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/open").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
