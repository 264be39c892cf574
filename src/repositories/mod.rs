//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 제네릭 리포지토리([`generic::Repository`])를 엔티티별로 인스턴스화하여
//! 요청 스코프 컴포넌트로 등록합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::catalog::ProductRepository;
//!
//! let products = scope.resolve::<ProductRepository>()?;
//! let page = products
//!     .get_all_paged(QuerySpec::read_only().order_by(product::Column::Name), Page::new(1, 20))
//!     .await?;
//! ```

pub mod catalog;
pub mod generic;
