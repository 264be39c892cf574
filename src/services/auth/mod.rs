//! 인증 서비스 모듈
//!
//! 클라이언트 자격 증명 기반 JWT 발급과 검증을 제공합니다.
//! 서명 알고리즘은 HMAC-SHA256이며, 키와 발급자/대상은 [`crate::config::JwtSettings`]에서 옵니다.

pub mod token_service;

pub use token_service::TokenService;
