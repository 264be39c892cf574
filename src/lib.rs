//! API 스타터 백엔드
//!
//! 카탈로그(카테고리/상품) REST API를 예제로 삼은 웹 API 스타터입니다.
//! 제네릭 리포지토리, 결과 엔벨로프, 레지스트리 기반 의존성 주입,
//! JWT Bearer 인증과 Rate Limiting을 제공합니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 스코프, 인증/역할 정책
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Controllers   │ ← handlers: 요청 → 커맨드, 엔벨로프 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Domain Handlers │ ← 검증, 비즈니스 규칙, CommandResult
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 엔티티 단위 데이터 서비스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 제네릭 리포지토리 + DbContext
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SQLite/Postgres │ ← sea-orm
//! └─────────────────┘
//! ```
//!
//! 모든 컴포넌트는 [`core::registry::ServiceRegistry`]에 등록되며,
//! 요청마다 [`core::registry::RequestScope`]에서 스코프 인스턴스를 해석합니다.

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
