//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 데이터베이스, CORS, Rate Limiting 설정 섹션을 정의합니다.

use std::collections::HashMap;

use super::{parse_bool, parse_number, ConfigError, Lookup};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값에서 실행 환경을 결정합니다.
    ///
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Self {
        lookup("ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// 기본값: "0.0.0.0" (모든 인터페이스)
    pub host: String,
    /// 기본값: 8080
    pub port: u16,
    /// 워커 스레드 수. 기본값: 4
    pub workers: usize,
}

impl ServerSettings {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number(lookup, "PORT", 8080)?,
            workers: parse_number(lookup, "WORKERS", 4)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    /// `CONNECTION_STRING_DEFAULT` (sqlite:// 또는 postgres://)
    pub connection_string: String,
    pub max_connections: u32,
    /// sqlx 문장 로깅 여부
    pub sql_logging: bool,
    /// 시작 시 누락된 테이블 생성 여부
    pub auto_migrate: bool,
}

impl DatabaseSettings {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            connection_string: lookup("CONNECTION_STRING_DEFAULT")
                .unwrap_or_else(|| "sqlite://api_starter.db?mode=rwc".to_string()),
            max_connections: parse_number(lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            sql_logging: parse_bool(lookup, "DATABASE_SQL_LOGGING", false)?,
            auto_migrate: parse_bool(lookup, "DATABASE_AUTO_MIGRATE", true)?,
        })
    }
}

/// CORS 설정
#[derive(Debug, Clone, PartialEq)]
pub struct CorsSettings {
    /// 허용할 Origin 목록 (쉼표 구분)
    pub allowed_origins: Vec<String>,
    /// Preflight 요청 캐시 시간 (초)
    pub max_age: usize,
}

impl CorsSettings {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        };

        Ok(Self {
            allowed_origins,
            max_age: parse_number(lookup, "CORS_MAX_AGE", 3600)?,
        })
    }
}

/// 단일 Rate Limiting 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// 초당 보충되는 요청 수
    pub per_second: u64,
    /// 버스트 허용량
    pub burst_size: u32,
}

/// 이름 붙은 Rate Limiting 정책 모음
///
/// `RATE_LIMIT_POLICIES="global:100:200,auth:2:5"` 형식으로 지정하며,
/// 지정하지 않은 `global`, `auth` 정책은 기본값을 사용합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitSettings {
    policies: HashMap<String, RateLimitPolicy>,
}

impl RateLimitSettings {
    pub const GLOBAL: &'static str = "global";
    pub const AUTH: &'static str = "auth";

    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let mut policies = HashMap::from([
            (
                Self::GLOBAL.to_string(),
                RateLimitPolicy {
                    per_second: 100,
                    burst_size: 200,
                },
            ),
            (
                Self::AUTH.to_string(),
                RateLimitPolicy {
                    per_second: 2,
                    burst_size: 5,
                },
            ),
        ]);

        if let Some(raw) = lookup("RATE_LIMIT_POLICIES") {
            for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                let (name, policy) = parse_policy(entry)?;
                policies.insert(name, policy);
            }
        }

        Ok(Self { policies })
    }

    /// 이름으로 정책을 찾습니다. 없으면 `global` 정책을 사용합니다.
    pub fn policy(&self, name: &str) -> RateLimitPolicy {
        self.policies
            .get(name)
            .or_else(|| self.policies.get(Self::GLOBAL))
            .copied()
            .unwrap_or(RateLimitPolicy {
                per_second: 100,
                burst_size: 200,
            })
    }
}

fn parse_policy(entry: &str) -> Result<(String, RateLimitPolicy), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: "RATE_LIMIT_POLICIES",
        value: entry.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
    let [name, per_second, burst_size] = parts.as_slice() else {
        return Err(invalid("expected name:per_second:burst"));
    };

    let per_second: u64 = per_second
        .parse()
        .map_err(|_| invalid("per_second must be a positive integer"))?;
    let burst_size: u32 = burst_size
        .parse()
        .map_err(|_| invalid("burst must be a positive integer"))?;
    if per_second == 0 || burst_size == 0 {
        return Err(invalid("per_second and burst must be greater than 0"));
    }

    Ok((
        name.to_string(),
        RateLimitPolicy {
            per_second,
            burst_size,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::lookup_from;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_server_settings_defaults() {
        let lookup = lookup_from(&[]);
        let server = ServerSettings::from_lookup(&lookup).unwrap();

        assert_eq!(server.port, 8080);
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let lookup = lookup_from(&[("PORT", "eighty")]);

        assert!(matches!(
            ServerSettings::from_lookup(&lookup),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let lookup = lookup_from(&[("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,")]);
        let cors = CorsSettings::from_lookup(&lookup).unwrap();

        assert_eq!(
            cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_rate_limit_policies_override_defaults() {
        let lookup = lookup_from(&[("RATE_LIMIT_POLICIES", "auth:1:3, reports:10:20")]);
        let limits = RateLimitSettings::from_lookup(&lookup).unwrap();

        assert_eq!(limits.policy("auth").burst_size, 3);
        assert_eq!(limits.policy("reports").per_second, 10);
        assert_eq!(limits.policy(RateLimitSettings::GLOBAL).per_second, 100);
        assert_eq!(limits.policy("unknown"), limits.policy(RateLimitSettings::GLOBAL));
    }

    #[test]
    fn test_malformed_rate_limit_policy() {
        let lookup = lookup_from(&[("RATE_LIMIT_POLICIES", "auth:0:3")]);

        assert!(RateLimitSettings::from_lookup(&lookup).is_err());
        assert!(parse_policy("auth:1").is_err());
    }
}
