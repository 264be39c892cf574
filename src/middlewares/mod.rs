//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 ([`AuthMiddleware`])
//! - Bearer JWT 검증 후 [`AuthenticatedUser`](crate::domain::models::AuthenticatedUser)를 요청 확장 영역에 저장
//! - 필수/선택 인증 모드, 조회/변경별 역할 요구
//! - 401/403 응답은 표준 결과 엔벨로프로 반환
//!
//! ### 2. 요청 텔레메트리 ([`RequestTelemetry`])
//! - `x-request-id` 부여 및 전파
//! - 메서드, 경로, 상태 코드, 처리 시간 로깅
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(RequestTelemetry)
//!     .service(
//!         web::scope("/api/v1/categories")
//!             .wrap(AuthMiddleware::required_with_roles(vec!["reader", "writer"]).writes_require("writer"))
//!             .configure(categories::configure),
//!     )
//! ```

mod auth_inner;
pub mod auth_middleware;
pub mod telemetry;

pub use auth_middleware::AuthMiddleware;
pub use telemetry::{RequestId, RequestTelemetry};
