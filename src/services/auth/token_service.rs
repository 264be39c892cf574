//! JWT 토큰 관리 서비스 구현
//!
//! 클라이언트 자격 증명으로 발급하는 HMAC-SHA256 액세스 토큰의
//! 생성과 검증을 담당합니다. 검증 시 서명, 만료, 발급자(iss), 대상(aud)을 확인합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtSettings;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::tokens::TokenResponse;
use crate::domain::models::auth::Claims;

/// JWT 토큰 관리 서비스
///
/// 시작 시 [`JwtSettings`]로 한 번 생성되어 레지스트리 싱글톤으로 공유됩니다.
pub struct TokenService {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            settings,
        }
    }

    /// 주체와 역할로 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue(&client.client_id, &client.roles)?;
    /// assert_eq!(token.token_type, "Bearer");
    /// ```
    pub fn issue(&self, subject: &str, roles: &[String]) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let lifetime = Duration::minutes(self.settings.expiration_minutes);

        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok(TokenResponse::bearer(access_token, lifetime.num_seconds()))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 서명 불일치, 발급자/대상 불일치, 잘못된 형식
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })
    }

    /// `Authorization: Bearer {token}` 헤더에서 토큰 부분을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}
