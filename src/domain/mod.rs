//! # Domain Layer
//!
//! 비즈니스 개념을 표현하는 계층입니다.
//!
//! - [`entities`] - 데이터베이스 테이블과 매핑되는 SeaORM 엔티티
//! - [`dto`] - HTTP 요청/응답 타입
//! - [`models`] - 커맨드 결과 봉투, 인증 주체 등 도메인 모델
//! - [`handlers`] - 커맨드를 처리하는 도메인 핸들러
//!
//! 도메인 핸들러는 컨트롤러와 데이터 서비스 사이에 위치하며,
//! 처리 결과를 항상 [`models::CommandResult`]로 돌려줍니다.

pub mod dto;
pub mod entities;
pub mod handlers;
pub mod models;
