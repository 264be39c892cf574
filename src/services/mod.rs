//! 서비스 계층 모듈
//!
//! - [`catalog`] - 리포지토리를 조합하는 요청 스코프 데이터 서비스
//! - [`auth`] - JWT 발급/검증 (애플리케이션 싱글톤)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, catalog::ProductService};
//!
//! let tokens = registry.get::<TokenService>()?;
//! let products = scope.resolve::<ProductService>()?;
//! ```

pub mod auth;
pub mod catalog;
