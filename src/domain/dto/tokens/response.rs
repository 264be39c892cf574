use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 발급된 액세스 토큰
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// 항상 `Bearer`
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
