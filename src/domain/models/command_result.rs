//! # Command Result Envelope
//!
//! 도메인 핸들러가 컨트롤러에 돌려주는 결과 타입과, 그 결과가 직렬화되는
//! 표준 HTTP 응답 엔벨로프를 정의합니다.
//!
//! `CommandResult`는 네 가지 결과 중 정확히 하나로 생성되고 이후 변경되지 않는
//! 합 타입(sum type)입니다. "아직 설정되지 않은 상태"나 결과를 두 번 설정하는
//! 상황은 타입 수준에서 표현할 수 없습니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | 상태 코드 | 응답 |
//! |------|-----------|------|
//! | `Ok` | 200 | `data` (+ `total`) |
//! | `Created` | 201 | `id` + `Location: {요청 경로}/{id}` 헤더 |
//! | `BadRequest` | 400 | `message` + `errors` |
//! | `ServerError` | 500 | `errorId` + `message` |
//!
//! ## 엔벨로프 JSON
//!
//! ```json
//! { "total": 2, "data": ["a", "b"] }
//! ```
//!
//! 값이 없는 필드는 직렬화 시 생략됩니다.

use actix_web::body::BoxBody;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// 도메인 핸들러의 단일 결과
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult<T> {
    /// 성공: 데이터와 (목록 조회라면) 페이지네이션을 무시한 전체 건수
    Ok { data: T, total: Option<u64> },
    /// 생성 성공: 새 리소스의 식별자
    Created { id: String },
    /// 클라이언트 오류: 요약 메시지와 개별 오류 목록
    BadRequest { message: String, errors: Vec<String> },
    /// 서버 오류: 로그 상관관계용 불투명 ID와 일반 메시지
    ServerError { error_id: String, message: String },
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        CommandResult::Ok { data, total: None }
    }

    pub fn ok_with_total(data: T, total: u64) -> Self {
        CommandResult::Ok {
            data,
            total: Some(total),
        }
    }

    pub fn created(id: impl ToString) -> Self {
        CommandResult::Created { id: id.to_string() }
    }

    pub fn bad_request(message: impl Into<String>, errors: Vec<String>) -> Self {
        CommandResult::BadRequest {
            message: message.into(),
            errors,
        }
    }

    pub fn server_error(error_id: impl Into<String>, message: impl Into<String>) -> Self {
        CommandResult::ServerError {
            error_id: error_id.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CommandResult::Ok { .. } => StatusCode::OK,
            CommandResult::Created { .. } => StatusCode::CREATED,
            CommandResult::BadRequest { .. } => StatusCode::BAD_REQUEST,
            CommandResult::ServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CommandResult::Ok { .. } | CommandResult::Created { .. })
    }

    /// 성공 데이터에 변환을 적용합니다. 다른 변형은 그대로 전달됩니다.
    pub fn map<U, F>(self, f: F) -> CommandResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            CommandResult::Ok { data, total } => CommandResult::Ok {
                data: f(data),
                total,
            },
            CommandResult::Created { id } => CommandResult::Created { id },
            CommandResult::BadRequest { message, errors } => {
                CommandResult::BadRequest { message, errors }
            }
            CommandResult::ServerError { error_id, message } => {
                CommandResult::ServerError { error_id, message }
            }
        }
    }

    /// 직렬화용 엔벨로프로 변환합니다.
    pub fn into_envelope(self) -> ResultEnvelope<T> {
        match self {
            CommandResult::Ok { data, total } => ResultEnvelope {
                total,
                data: Some(data),
                ..ResultEnvelope::empty()
            },
            CommandResult::Created { id } => ResultEnvelope {
                id: Some(id),
                ..ResultEnvelope::empty()
            },
            CommandResult::BadRequest { message, errors } => {
                ResultEnvelope::bad_request(message, errors)
            }
            CommandResult::ServerError { error_id, message } => {
                ResultEnvelope::server_error(error_id, message)
            }
        }
    }
}

impl<T: Serialize> Responder for CommandResult<T> {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = self.status_code();
        match self {
            CommandResult::Created { ref id } => {
                let location = format!("{}/{}", req.path().trim_end_matches('/'), id);
                HttpResponse::Created()
                    .insert_header((header::LOCATION, location))
                    .json(self.into_envelope())
            }
            CommandResult::Ok { .. } | CommandResult::BadRequest { .. } => {
                HttpResponse::build(status).json(self.into_envelope())
            }
            CommandResult::ServerError { .. } => {
                HttpResponse::InternalServerError().json(self.into_envelope())
            }
        }
    }
}

/// HTTP 응답 엔벨로프
///
/// `data`는 200 응답에서만, `errors`는 400 응답에서만 채워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ResultEnvelope<T> {
    fn empty() -> Self {
        Self {
            id: None,
            total: None,
            data: None,
            error_id: None,
            message: None,
            errors: None,
        }
    }

    pub fn bad_request(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: Some(errors),
            ..Self::empty()
        }
    }

    pub fn server_error(error_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_id: Some(error_id.into()),
            message: Some(message.into()),
            ..Self::empty()
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_success_envelope_round_trip() {
        let result = CommandResult::ok_with_total(vec!["a".to_string(), "b".to_string()], 2);
        let json = serde_json::to_string(&result.into_envelope()).unwrap();
        let restored: ResultEnvelope<Vec<String>> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.data, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(restored.total, Some(2));
        assert!(restored.error_id.is_none());
        assert!(restored.errors.is_none());
        assert!(!json.contains("errorId"));
        assert!(!json.contains("errors"));
    }

    #[test]
    fn test_bad_request_envelope_uses_camel_case_and_omits_data() {
        let result: CommandResult<()> =
            CommandResult::bad_request("invalid", vec!["name: required".to_string()]);
        let value = serde_json::to_value(result.into_envelope()).unwrap();

        assert_eq!(value["message"], "invalid");
        assert_eq!(value["errors"][0], "name: required");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_server_error_envelope_serializes_error_id() {
        let result: CommandResult<()> = CommandResult::server_error("abc123", "failed");
        let value = serde_json::to_value(result.into_envelope()).unwrap();

        assert_eq!(value["errorId"], "abc123");
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CommandResult::ok(1).status_code(), StatusCode::OK);
        assert_eq!(CommandResult::<()>::created("x").status_code(), StatusCode::CREATED);
        assert_eq!(
            CommandResult::<()>::bad_request("m", vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CommandResult::<()>::server_error("e", "m").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_map_only_touches_success_data() {
        let mapped = CommandResult::ok_with_total(2, 10).map(|n| n * 2);
        assert_eq!(mapped, CommandResult::ok_with_total(4, 10));

        let untouched: CommandResult<i32> =
            CommandResult::<i32>::bad_request("m", vec![]).map(|n| n * 2);
        assert!(!untouched.is_success());
    }

    #[test]
    fn test_created_response_sets_location_header() {
        let req = TestRequest::post().uri("/api/v1/products/").to_http_request();
        let response = CommandResult::<()>::created("42").respond_to(&req);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/v1/products/42"
        );
    }

    #[test]
    fn test_server_error_response_status() {
        let req = TestRequest::get().to_http_request();
        let response = CommandResult::<()>::server_error("id", "boom").respond_to(&req);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
