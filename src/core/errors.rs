//! # Application Error Handling System
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! 계층별 에러(리포지토리, 레지스트리, 설정)를 하나의 `AppError`로 모으고,
//! `actix_web::ResponseError`를 구현하여 표준 응답 엔벨로프로 변환합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 응답 본문 |
//! |----------|-------------|-----------|
//! | `ValidationError` | 400 Bad Request | `message` + `errors` |
//! | `InvalidPayload` | 400 Bad Request | `message` + 필드별 `errors` |
//! | `AuthenticationError` | 401 Unauthorized | `message` |
//! | `AuthorizationError` | 403 Forbidden | `message` |
//! | `NotFound` | 404 Not Found | `message` |
//! | 그 외 | 500 Internal Server Error | `errorId` + 일반 메시지 |
//!
//! 500 응답은 내부 상세 정보를 클라이언트에 노출하지 않습니다.
//! 대신 불투명한 `errorId`를 발급하고, 같은 ID로 상세 원인을 로그에 남겨
//! 운영자가 요청과 로그를 연결할 수 있게 합니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_category(&self, id: Uuid) -> AppResult<category::Model> {
//!     self.categories
//!         .get_first(QuerySpec::read_only().filter(category::Column::Id.eq(id)))
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

use crate::core::registry::RegistryError;
use crate::domain::models::command_result::ResultEnvelope;
use crate::repositories::generic::RepositoryError;

/// 애플리케이션 전역 에러 타입
///
/// 핸들러가 직접 처리하지 않은(uncaught) 실패는 모두 이 타입으로 전파되며,
/// 컨트롤러 경계에서 [`ResultEnvelope`] 형태의 JSON 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 연산(커밋, 조회) 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 단일 메시지로 표현되는 입력값 검증 실패
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필드별 검증 실패 목록
    #[error("Invalid payload: {}", .0.join(", "))]
    InvalidPayload(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 의존성 주입 컨테이너에서 컴포넌트를 해석하지 못한 경우
    #[error("Dependency resolution error: {0}")]
    DependencyError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 이 에러가 매핑되는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에 전달할 엔벨로프를 생성합니다.
    ///
    /// 500 계열은 새 `errorId`를 발급하고 상세 원인을 같은 ID로 로그에 기록합니다.
    pub fn to_envelope(&self) -> ResultEnvelope<()> {
        match self {
            AppError::ValidationError(message) => {
                ResultEnvelope::bad_request("요청 값이 올바르지 않습니다", vec![message.clone()])
            }
            AppError::InvalidPayload(errors) => {
                ResultEnvelope::bad_request("요청 값이 올바르지 않습니다", errors.clone())
            }
            AppError::AuthenticationError(message)
            | AppError::AuthorizationError(message)
            | AppError::NotFound(message) => ResultEnvelope::message_only(message.clone()),
            _ => {
                let error_id = Uuid::new_v4().simple().to_string();
                log::error!("[{}] 처리되지 않은 오류: {}", error_id, self);
                ResultEnvelope::server_error(error_id, "요청을 처리하는 중 오류가 발생했습니다")
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self.to_envelope())
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Argument { .. } => AppError::ValidationError(error.to_string()),
            RepositoryError::Persistence(db_err) => AppError::DatabaseError(db_err.to_string()),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(error: RegistryError) -> Self {
        AppError::DependencyError(error.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidPayload(validation_messages(&errors))
    }
}

/// 검증 결과를 정렬된 `필드: 메시지` 목록으로 변환합니다.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_validation_messages("", errors, &mut messages);
    messages.sort();
    messages
}

/// 중첩 구조체/목록 검증 결과를 `items[0].name: 메시지` 형태로 펼칩니다.
fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    messages: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                messages.extend(field_errors.iter().map(|error| match &error.message {
                    Some(message) => format!("{}: {}", path, message),
                    None => format!("{}: {}", path, error.code),
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, messages);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, messages);
                }
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러에 문맥 메시지를 덧붙여 `AppError::InternalError`로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("name is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Product not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());

        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Insufficient permissions".to_string());

        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_hides_detail_behind_error_id() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        let envelope = error.to_envelope();

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(envelope.error_id.is_some());
        assert!(!envelope.message.unwrap_or_default().contains("10.0.0.3"));
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn test_bad_request_envelope_carries_errors() {
        let error = AppError::InvalidPayload(vec!["name: length".to_string()]);
        let envelope = error.to_envelope();

        assert_eq!(envelope.errors, Some(vec!["name: length".to_string()]));
        assert!(envelope.error_id.is_none());
    }

    #[test]
    fn test_repository_argument_error_maps_to_validation() {
        let error: AppError = RepositoryError::argument("page", "must be at least 1").into();

        assert!(matches!(error, AppError::ValidationError(_)));
    }

    #[test]
    fn test_repository_persistence_error_maps_to_database() {
        let error: AppError = RepositoryError::Persistence(DbErr::RecordNotUpdated).into();

        assert!(matches!(error, AppError::DatabaseError(_)));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_nested_validation_errors_are_flattened() {
        use crate::domain::dto::catalog::{ProductBatchRequest, ProductRequest};
        use validator::Validate;

        let batch = ProductBatchRequest {
            items: vec![ProductRequest {
                category_id: uuid::Uuid::nil(),
                name: "Pen".to_string(),
                price_cents: -5,
            }],
        };

        match AppError::from(batch.validate().unwrap_err()) {
            AppError::InvalidPayload(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].starts_with("items[0].price_cents:"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
