//! # Domain Entities
//!
//! 데이터베이스 테이블에 대응하는 `sea-orm` 엔티티들입니다.
//!
//! | 모듈 | 테이블 | 비고 |
//! |------|--------|------|
//! | [`catalog::category`] | `categories` | |
//! | [`catalog::product`] | `products` | `category_id` → `categories.id`, `category` include 슬롯 |
//!
//! 모든 엔티티 모델은 [`AuditedEntity`]를 구현합니다.

mod audited;
pub mod catalog;

pub(crate) use audited::impl_audited_entity;
pub use audited::AuditedEntity;
