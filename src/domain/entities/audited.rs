//! 감사(audit) 필드를 가진 영속 엔티티 공통 계약

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 식별자, 감사 사용자 로그, 마지막 변경 시각을 가진 엔티티
///
/// 식별자는 생성 시점에 UUID v4로 부여되고 이후 바뀌지 않습니다.
/// 감사 필드는 [`AuditedEntity::touch`]로만 갱신되며, 호출 시 변경 시각도
/// 현재 UTC 시각으로 다시 기록됩니다.
pub trait AuditedEntity {
    fn id(&self) -> Uuid;

    fn user_log(&self) -> &str;

    fn updated_at(&self) -> DateTime<Utc>;

    fn touch(&mut self, user_log: &str);
}

/// `AuditedEntity`를 sea-orm 모델에 구현합니다.
///
/// 대상 모델은 `id: Uuid`, `user_log: String`, `updated_at: DateTimeUtc` 컬럼을
/// 가져야 합니다.
macro_rules! impl_audited_entity {
    ($model:ty) => {
        impl $crate::domain::entities::AuditedEntity for $model {
            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn user_log(&self) -> &str {
                &self.user_log
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self, user_log: &str) {
                self.user_log = user_log.to_string();
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

pub(crate) use impl_audited_entity;
