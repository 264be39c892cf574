use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 클라이언트 자격 증명 토큰 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    /// 항상 `client_credentials`
    #[validate(custom(function = "validate_grant_type"))]
    pub grant_type: String,

    #[validate(length(min = 1, message = "client_id가 필요합니다"))]
    pub client_id: String,

    #[validate(length(min = 1, message = "client_secret이 필요합니다"))]
    pub client_secret: String,
}

fn validate_grant_type(grant_type: &str) -> Result<(), validator::ValidationError> {
    if grant_type != "client_credentials" {
        return Err(validator::ValidationError::new("unsupported_grant_type")
            .with_message("지원하지 않는 grant_type입니다".into()));
    }
    Ok(())
}
