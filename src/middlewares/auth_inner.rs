//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceRegistry;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
    pub write_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();
        let write_role = self.write_role.clone();

        Box::pin(async move {
            let auth_result = authenticate(&req);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
                (AuthMode::Required, Ok(user)) => {
                    let mut requirements = required_role.iter().collect::<Vec<_>>();
                    if is_write(req.method()) {
                        requirements.extend(write_role.iter());
                    }
                    if let Some(unmet) = requirements
                        .into_iter()
                        .find(|required| !required.is_satisfied(&user.roles))
                    {
                        log::warn!(
                            "권한 부족: {} ({:?}), 필요 권한: {:?}",
                            user.subject,
                            user.roles,
                            unmet
                        );
                        let err = AppError::AuthorizationError("접근 권한이 부족합니다".to_string());
                        return Ok(reject(req, err));
                    }

                    log::debug!("인증 성공: {}", user.subject);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    log::debug!("선택적 인증 성공: {}", user.subject);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn is_write(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청의 Bearer 토큰을 검증하여 호출 주체를 만듭니다.
fn authenticate(req: &ServiceRequest) -> AppResult<AuthenticatedUser> {
    let token_service = req
        .app_data::<web::Data<ServiceRegistry>>()
        .ok_or_else(|| AppError::DependencyError("ServiceRegistry가 등록되지 않았습니다".to_string()))?
        .get::<TokenService>()?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(AuthenticatedUser::from(claims))
}
