//! 상품 카테고리 엔티티

use sea_orm::entity::prelude::*;

use crate::domain::entities::impl_audited_entity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_log: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 새 식별자와 현재 시각으로 카테고리를 생성합니다.
    pub fn new(name: impl Into<String>, description: Option<String>, user_log: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            user_log: user_log.to_string(),
            updated_at: chrono::Utc::now(),
        }
    }
}

impl_audited_entity!(Model);
