//! # Generic Repository Module
//!
//! 엔티티 종류와 무관하게 재사용되는 데이터 접근 계층입니다.
//!
//! - [`Repository`] - 엔티티별로 인스턴스화되는 CRUD/조회 리포지토리
//! - [`QuerySpec`] / [`Include`] - 조건, 정렬, eager-load, 추적 여부를 담은 질의 명세
//! - [`Page`] / [`PagedResult`] - 페이지 조회 입력과 결과
//! - [`RepositoryError`] / [`with_cancellation`] - 실패 분류와 취소 처리
//!
//! 리포지토리는 연결을 직접 열지 않고, 요청 스코프의 [`crate::db::DbContext`]를
//! 주입받아 사용합니다.

mod error;
mod query;
mod repository;

pub use error::{with_cancellation, RepositoryError, RepositoryResult};
pub use query::{Include, Page, PagedResult, QuerySpec};
pub use repository::Repository;
