//! 리포지토리 계층 에러와 취소 처리

use std::future::Future;

use sea_orm::DbErr;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// 제네릭 리포지토리 연산의 실패 분류
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 잘못된 인자. 쿼리가 실행되기 전에 반환됩니다.
    #[error("Invalid argument `{argument}`: {reason}")]
    Argument {
        argument: &'static str,
        reason: String,
    },

    /// 단건 조회에서 두 개 이상의 행이 일치함
    #[error("More than one `{entity}` row matched a single-result query")]
    AmbiguousResult { entity: &'static str },

    /// 데이터베이스 커밋/조회 실패. 재시도 없이 그대로 전파됩니다.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] DbErr),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RepositoryError {
    pub fn argument(argument: &'static str, reason: impl Into<String>) -> Self {
        RepositoryError::Argument {
            argument,
            reason: reason.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 리포지토리 연산을 취소 토큰과 경합시킵니다.
///
/// 토큰이 먼저 취소되면 진행 중인 future는 drop 되고(열린 트랜잭션은 롤백)
/// [`RepositoryError::Cancelled`]가 반환됩니다. 이미 취소된 토큰은 연산을
/// 시작하지 않습니다.
///
/// ```rust,ignore
/// let token = CancellationToken::new();
/// let rows = with_cancellation(&token, products.get_all(spec)).await?;
/// ```
pub async fn with_cancellation<T, F>(token: &CancellationToken, operation: F) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            log::debug!("리포지토리 연산이 취소되었습니다");
            Err(RepositoryError::Cancelled)
        }
        result = operation => result,
    }
}
