//! 도메인 모델
//!
//! 영속되지 않는 도메인 값 타입들입니다.

pub mod auth;
pub mod command_result;

pub use auth::{AuthMode, AuthenticatedUser, Claims, RequiredRole};
pub use command_result::{CommandResult, ResultEnvelope};
