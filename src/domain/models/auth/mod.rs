//! 인증 주체와 권한 요구사항

pub mod authenticated_user;
pub mod authorization;

pub use authenticated_user::{AuthenticatedUser, Claims};
pub use authorization::{AuthMode, RequiredRole};
