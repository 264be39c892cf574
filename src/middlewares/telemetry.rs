//! 요청 텔레메트리 미들웨어
//!
//! 요청마다 `x-request-id`를 부여(또는 전달받은 값을 유지)하고,
//! 응답 헤더에 같은 값을 돌려준 뒤 메서드, 경로, 상태 코드, 처리 시간을 로그로 남깁니다.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 전달받은 ID를 그대로 쓸 수 있는 최대 길이
const MAX_REQUEST_ID_LEN: usize = 128;

/// 요청 상관관계 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// 유효한 헤더 값이면 재사용하고, 아니면 새 ID를 만듭니다.
    fn from_header(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
            .filter(|v| v.chars().all(|c| c.is_ascii_graphic()))
            .map(|v| RequestId(v.to_string()))
            .unwrap_or_else(|| RequestId(Uuid::new_v4().simple().to_string()))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId::from_header(req.headers().get(REQUEST_ID_HEADER)));
        ready(Ok(id))
    }
}

/// 요청 텔레메트리 미들웨어
///
/// ```rust,ignore
/// App::new().wrap(RequestTelemetry)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTelemetry;

impl<S, B> Transform<S, ServiceRequest> for RequestTelemetry
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTelemetryService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTelemetryService { service }))
    }
}

pub struct RequestTelemetryService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTelemetryService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let request_id = RequestId::from_header(req.headers().get(REQUEST_ID_HEADER));
        let method = req.method().clone();
        let path = req.path().to_string();
        req.extensions_mut().insert(request_id.clone());

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            let elapsed = started.elapsed();
            let status = res.status();

            if let Ok(value) = HeaderValue::from_str(&request_id.0) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            if status.is_server_error() {
                log::error!(
                    "[{}] {} {} -> {} ({:.2?})",
                    request_id,
                    method,
                    path,
                    status.as_u16(),
                    elapsed
                );
            } else {
                log::info!(
                    "[{}] {} {} -> {} ({:.2?})",
                    request_id,
                    method,
                    path,
                    status.as_u16(),
                    elapsed
                );
            }
            Ok(res)
        })
    }
}
