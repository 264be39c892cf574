/// 인증 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 토큰이 있으면 검증하고, 없어도 허용
    Optional,
}

/// 요구되는 역할 정보
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    Single(String),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user_roles.contains(role))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_matching() {
        let roles = vec!["reader".to_string()];

        assert!(RequiredRole::Single("reader".to_string()).is_satisfied(&roles));
        assert!(!RequiredRole::Single("writer".to_string()).is_satisfied(&roles));
        assert!(RequiredRole::Any(vec!["writer".to_string(), "reader".to_string()])
            .is_satisfied(&roles));
        assert!(!RequiredRole::Any(vec![]).is_satisfied(&roles));
    }
}
