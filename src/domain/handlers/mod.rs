//! # Domain Handlers
//!
//! 컨트롤러가 만든 커맨드를 받아 데이터 서비스를 호출하고,
//! 결과를 [`CommandResult`] 봉투로 돌려주는 계층입니다.
//!
//! ```text
//! Controller ──(Command)──▶ CommandHandler ──▶ Data Service ──▶ Repository
//!     ◀──────(CommandResult)──────┘
//! ```
//!
//! 입력 검증 실패나 도메인 규칙 위반은 `CommandResult::BadRequest`로,
//! 리소스 부재와 처리되지 않은 실패는 [`AppError`]로 전파됩니다.

pub mod catalog;

use async_trait::async_trait;

use crate::core::errors::{validation_messages, AppError};
use crate::domain::models::CommandResult;

/// 커맨드 하나를 처리하는 도메인 핸들러
///
/// 한 핸들러 타입이 여러 커맨드에 대해 구현할 수 있으며,
/// 호출 시 커맨드 타입으로 구현이 선택됩니다.
#[async_trait]
pub trait CommandHandler<C: Send + 'static> {
    type Output;

    async fn handle(&self, command: C) -> Result<CommandResult<Self::Output>, AppError>;
}

pub(crate) const INVALID_REQUEST: &str = "요청 값이 올바르지 않습니다";

/// 검증 실패를 `BadRequest` 결과로 변환합니다.
pub(crate) fn rejected<T>(errors: &validator::ValidationErrors) -> CommandResult<T> {
    CommandResult::bad_request(INVALID_REQUEST, validation_messages(errors))
}
