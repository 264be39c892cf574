//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 받아 커맨드로 바꾸고, 도메인 핸들러의 결과를 응답으로 돌려주는
//! 컨트롤러 계층입니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//!   Handlers (이 모듈) - 경로, 추출자, OpenAPI      ← Web Layer
//! ├──────────────────────────────────────────────┤
//!   Domain Handlers - 커맨드 → CommandResult       ← Domain Layer
//! ├──────────────────────────────────────────────┤
//!   Data Services / Repositories                   ← Data Layer
//! └──────────────────────────────────────────────┘
//! ```
//!
//! 컨트롤러는 [`Inject`](crate::core::registry::Inject)로 요청 스코프 컴포넌트를 받고,
//! `AppResult<CommandResult<T>>`를 그대로 반환합니다. 상태 코드와 엔벨로프 변환은
//! `CommandResult`와 `AppError`의 `Responder`/`ResponseError` 구현이 담당합니다.
//!
//! ```rust,ignore
//! #[get("/{id}")]
//! pub async fn get_product(
//!     handler: Inject<ProductHandler>,
//!     id: web::Path<Uuid>,
//! ) -> AppResult<CommandResult<ProductResponse>> {
//!     handler.handle(GetProduct { id: id.into_inner() }).await
//! }
//! ```

pub mod auth;
pub mod categories;
pub mod docs;
pub mod health;
pub mod products;
