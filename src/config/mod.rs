//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 섹션들을 시작 시 한 번 타입이 있는 [`AppSettings`]로 바인딩하고,
//! 이후에는 레지스트리 싱글톤으로 모든 소비자에게 전달합니다.
//! 전역 가변 상태는 두지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, CORS, Rate Limiting
//! - [`auth_config`] - JWT, API 클라이언트
//!
//! ## 환경 변수 섹션
//!
//! | 섹션 | 키 |
//! |------|----|
//! | 애플리케이션 | `APP_NAME`, `ENVIRONMENT`, `API_DOCS_ENABLED` |
//! | 서버 | `HOST`, `PORT`, `WORKERS` |
//! | 데이터베이스 | `CONNECTION_STRING_DEFAULT`, `DATABASE_MAX_CONNECTIONS`, `DATABASE_SQL_LOGGING`, `DATABASE_AUTO_MIGRATE` |
//! | JWT | `JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE`, `JWT_EXPIRATION_MINUTES` |
//! | 클라이언트 | `API_CLIENTS` |
//! | CORS | `CORS_ALLOWED_ORIGINS`, `CORS_MAX_AGE` |
//! | Rate Limiting | `RATE_LIMIT_POLICIES` |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AppSettings;
//!
//! let settings = AppSettings::from_env()?;
//! println!("Server will bind to {}", settings.server.bind_address());
//! ```
//!
//! 테스트에서는 [`AppSettings::from_lookup`]에 맵 기반 조회 함수를 넘겨
//! 프로세스 환경 변수와 무관하게 설정을 구성합니다.

pub mod auth_config;
pub mod data_config;

use std::str::FromStr;

use thiserror::Error;

pub use auth_config::{ApiClient, JwtSettings};
pub use data_config::{
    CorsSettings, DatabaseSettings, Environment, RateLimitPolicy, RateLimitSettings,
    ServerSettings,
};

/// 설정 키 조회 함수
pub(crate) type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required configuration `{0}`")]
    Missing(&'static str),

    #[error("Invalid value `{value}` for `{key}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub app_name: String,
    pub environment: Environment,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub api_clients: Vec<ApiClient>,
    pub cors: CorsSettings,
    pub rate_limits: RateLimitSettings,
    /// OpenAPI 문서 노출 여부. 기본값: 프로덕션 외 환경에서 `true`
    pub api_docs_enabled: bool,
}

impl AppSettings {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);
        let api_docs_default = !environment.is_production();

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
            server: ServerSettings::from_lookup(lookup)?,
            database: DatabaseSettings::from_lookup(lookup)?,
            jwt: JwtSettings::from_lookup(lookup, &environment)?,
            api_clients: auth_config::api_clients_from_lookup(lookup, &environment)?,
            cors: CorsSettings::from_lookup(lookup)?,
            rate_limits: RateLimitSettings::from_lookup(lookup)?,
            api_docs_enabled: parse_bool(lookup, "API_DOCS_ENABLED", api_docs_default)?,
            environment,
        })
    }

    /// 자격 증명이 일치하는 API 클라이언트를 찾습니다.
    pub fn find_client(&self, client_id: &str, client_secret: &str) -> Option<&ApiClient> {
        self.api_clients
            .iter()
            .find(|client| client.client_id == client_id && client.client_secret == client_secret)
    }
}

pub(crate) fn parse_number<T: FromStr>(
    lookup: &Lookup<'_>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            reason: "expected a number".to_string(),
        }),
    }
}

pub(crate) fn parse_bool(
    lookup: &Lookup<'_>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                value,
                reason: "expected a boolean".to_string(),
            }),
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// 고정 맵에서 값을 찾는 조회 함수
    pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn test_development_settings_defaults() {
        let lookup = lookup_from(&[("ENVIRONMENT", "development")]);
        let settings = AppSettings::from_lookup(&lookup).unwrap();

        assert_eq!(settings.environment, Environment::Development);
        assert!(settings.api_docs_enabled);
        assert_eq!(settings.server.port, 8080);
        assert!(settings.database.auto_migrate);
        assert!(settings.find_client("dev-client", "dev-secret").is_some());
    }

    #[test]
    fn test_production_without_secret_fails() {
        let lookup = lookup_from(&[("ENVIRONMENT", "production")]);

        assert_eq!(
            AppSettings::from_lookup(&lookup).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_production_settings() {
        let lookup = lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "prod-secret"),
            ("PORT", "9000"),
            ("API_DOCS_ENABLED", "yes"),
        ]);
        let settings = AppSettings::from_lookup(&lookup).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert!(settings.api_docs_enabled);
        assert!(settings.api_clients.is_empty());
        assert!(settings.find_client("dev-client", "dev-secret").is_none());
    }

    #[test]
    fn test_invalid_boolean() {
        let lookup = lookup_from(&[("DATABASE_AUTO_MIGRATE", "maybe")]);

        assert!(matches!(
            AppSettings::from_lookup(&lookup),
            Err(ConfigError::Invalid {
                key: "DATABASE_AUTO_MIGRATE",
                ..
            })
        ));
    }
}
