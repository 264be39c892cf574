//! 상품 엔티티
//!
//! `category`는 테이블 컬럼이 아닌 include 슬롯입니다. [`include_category`]
//! 지시자를 사용한 조회에서만 채워지며, 쓰기 시에는 무시됩니다.

use std::collections::{HashMap, HashSet};

use futures_util::future::BoxFuture;
use sea_orm::entity::prelude::*;

use super::category;
use crate::domain::entities::impl_audited_entity;
use crate::repositories::generic::Include;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub user_log: String,
    pub updated_at: DateTimeUtc,
    #[sea_orm(ignore)]
    pub category: Option<category::Model>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(category_id: Uuid, name: impl Into<String>, price_cents: i64, user_log: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            name: name.into(),
            price_cents,
            user_log: user_log.to_string(),
            updated_at: chrono::Utc::now(),
            category: None,
        }
    }
}

impl_audited_entity!(Model);

/// 상품의 소속 카테고리를 채우는 include 지시자
pub fn include_category() -> Include<Model> {
    Include::new("category", load_categories)
}

fn load_categories<'a>(
    db: &'a DatabaseConnection,
    products: &'a mut [Model],
) -> BoxFuture<'a, Result<(), DbErr>> {
    Box::pin(async move {
        let ids: HashSet<Uuid> = products.iter().map(|p| p.category_id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        let categories: HashMap<Uuid, category::Model> = category::Entity::find()
            .filter(category::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        for product in products.iter_mut() {
            product.category = categories.get(&product.category_id).cloned();
        }
        Ok(())
    })
}
