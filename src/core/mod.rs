//! # Core Module
//!
//! 애플리케이션 전역에서 쓰는 기반 기능입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 레지스트리
//! - 시작 시 한 번 구성되는 싱글톤 (설정, 데이터베이스, 토큰 서비스)
//! - `inventory`로 수집되는 요청 스코프 컴포넌트 (컨텍스트, 리포지토리, 데이터 서비스, 도메인 핸들러)
//! - [`registry::Inject`] 추출자로 핸들러 인자에 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - [`errors::AppError`]: 애플리케이션 전역 에러 타입
//! - Actix-Web `ResponseError` 구현으로 결과 엔벨로프 응답
//!
//! ## 컴포넌트 등록
//!
//! ```rust,ignore
//! fn register(builder: &mut RegistryBuilder) {
//!     builder.scoped(
//!         Bucket::DataServiceHandlers,
//!         "CategoryService",
//!         |scope| Ok(Arc::new(CategoryService::new(scope.resolve()?, scope.resolve()?))),
//!     );
//! }
//!
//! inventory::submit! {
//!     ComponentRegistration { bucket: Bucket::DataServiceHandlers, name: "CategoryService", register }
//! }
//! ```
//!
//! ### 미등록 타입
//! ```text
//! ❌ Component not registered: CategoryService
//! ```
//! **해결**: `inventory::submit!` 등록 또는 `RegistryBuilder::singleton()` 호출 여부 확인

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
