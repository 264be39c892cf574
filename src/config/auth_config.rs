//! # Authentication Configuration Module
//!
//! JWT 토큰 발급/검증과 클라이언트 자격 증명(client credentials) 설정을 관리합니다.
//!
//! ## 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"   # 프로덕션 필수
//! export JWT_ISSUER="api-starter"
//! export JWT_AUDIENCE="api-starter-clients"
//! export JWT_EXPIRATION_MINUTES="60"
//! ```
//!
//! ### API 클라이언트
//! ```bash
//! # client_id:client_secret:role|role,...
//! export API_CLIENTS="dashboard:s3cret:reader|writer,reporting:0ther:reader"
//! ```
//!
//! ## 역할
//!
//! | 역할 | 허용 범위 |
//! |------|-----------|
//! | `reader` | 카탈로그 조회 |
//! | `writer` | 카탈로그 생성/수정/삭제 |

use super::{parse_number, ConfigError, Environment, Lookup};

/// 개발 환경 전용 기본 서명 키
const DEVELOPMENT_SECRET: &str = "development-only-secret-change-me";

/// JWT 토큰 설정
///
/// HMAC-SHA256 서명 키, 발급자(iss), 대상(aud), 만료 시간을 담습니다.
#[derive(Clone, PartialEq)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
}

impl JwtSettings {
    /// # Errors
    ///
    /// 프로덕션 환경에서 `JWT_SECRET`이 없으면 [`ConfigError::Missing`]
    pub(crate) fn from_lookup(
        lookup: &Lookup<'_>,
        environment: &Environment,
    ) -> Result<Self, ConfigError> {
        let secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            _ => {
                log::warn!("⚠️ JWT_SECRET이 설정되지 않아 개발용 키를 사용합니다");
                DEVELOPMENT_SECRET.to_string()
            }
        };

        let expiration_minutes = parse_number(lookup, "JWT_EXPIRATION_MINUTES", 60)?;
        if expiration_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_MINUTES",
                value: expiration_minutes.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "api-starter".to_string()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "api-starter-clients".to_string()),
            expiration_minutes,
        })
    }
}

// 서명 키가 로그에 남지 않도록 Debug를 직접 구현합니다.
impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// 토큰을 발급받을 수 있는 API 클라이언트
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    pub client_id: String,
    pub client_secret: String,
    pub roles: Vec<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("client_id", &self.client_id)
            .field("roles", &self.roles)
            .finish()
    }
}

/// `API_CLIENTS`를 파싱합니다.
///
/// 값이 없으면 프로덕션에서는 빈 목록, 그 외 환경에서는
/// `dev-client:dev-secret:reader|writer` 하나를 사용합니다.
pub(crate) fn api_clients_from_lookup(
    lookup: &Lookup<'_>,
    environment: &Environment,
) -> Result<Vec<ApiClient>, ConfigError> {
    let Some(raw) = lookup("API_CLIENTS") else {
        if environment.is_production() {
            return Ok(Vec::new());
        }
        return Ok(vec![ApiClient {
            client_id: "dev-client".to_string(),
            client_secret: "dev-secret".to_string(),
            roles: vec!["reader".to_string(), "writer".to_string()],
        }]);
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_client)
        .collect()
}

fn parse_client(entry: &str) -> Result<ApiClient, ConfigError> {
    let mut parts = entry.splitn(3, ':');
    let (Some(client_id), Some(client_secret), Some(roles)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(ConfigError::Invalid {
            key: "API_CLIENTS",
            value: entry.split(':').next().unwrap_or_default().to_string(),
            reason: "expected client_id:client_secret:role|role".to_string(),
        });
    };

    Ok(ApiClient {
        client_id: client_id.trim().to_string(),
        client_secret: client_secret.trim().to_string(),
        roles: roles
            .split('|')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::lookup_from;

    #[test]
    fn test_production_requires_jwt_secret() {
        let lookup = lookup_from(&[]);

        assert!(matches!(
            JwtSettings::from_lookup(&lookup, &Environment::Production),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_development_falls_back_to_local_secret() {
        let lookup = lookup_from(&[]);
        let jwt = JwtSettings::from_lookup(&lookup, &Environment::Development).unwrap();

        assert_eq!(jwt.secret, DEVELOPMENT_SECRET);
        assert_eq!(jwt.expiration_minutes, 60);
        assert!(!format!("{:?}", jwt).contains(DEVELOPMENT_SECRET));
    }

    #[test]
    fn test_api_clients_parsing() {
        let lookup = lookup_from(&[("API_CLIENTS", "dash:pw:reader|writer, report:pw2:reader")]);
        let clients = api_clients_from_lookup(&lookup, &Environment::Production).unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].client_id, "dash");
        assert_eq!(clients[0].roles, vec!["reader", "writer"]);
        assert_eq!(clients[1].client_secret, "pw2");
    }

    #[test]
    fn test_malformed_api_client_does_not_leak_secret() {
        let lookup = lookup_from(&[("API_CLIENTS", "dash:topsecret")]);
        let error = api_clients_from_lookup(&lookup, &Environment::Development).unwrap_err();

        assert!(!error.to_string().contains("topsecret"));
    }

    #[test]
    fn test_production_has_no_default_client() {
        let lookup = lookup_from(&[]);

        assert!(api_clients_from_lookup(&lookup, &Environment::Production)
            .unwrap()
            .is_empty());
    }
}
