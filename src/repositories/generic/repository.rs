//! # Generic Repository
//!
//! 임의의 `sea-orm` 엔티티에 대한 CRUD 및 조회 연산을 제공합니다.
//!
//! ## 연산 요약
//!
//! | 연산 | 입력 제약 | 결과 | 부수 효과 |
//! |------|-----------|------|-----------|
//! | `add` | - | `()` | insert 적재 후 즉시 커밋 |
//! | `add_many` | 비어 있지 않음 | `()` | N개 insert, 한 번의 커밋 |
//! | `update` | - | `()` | update 적재 후 커밋 |
//! | `remove` | - | `()` | delete 적재 후 커밋 |
//! | `exists` | 조건 필수 | `bool` | 읽기 전용 |
//! | `count` | - | `u64` | 읽기 전용 |
//! | `get_first` | - | `Option<Model>` | 읽기 전용이 아니면 추적 |
//! | `get_single` | - | `Option<Model>` | 2건 이상이면 `AmbiguousResult` |
//! | `get_all` | - | 정렬된 `Vec<Model>` | |
//! | `get_all_paged` | page ≥ 1, size > 0, 정렬 필수 | `PagedResult` | count + 범위 조회 |
//!
//! ## 질의 구성 순서
//!
//! 1. 엔티티 전체 집합에서 시작
//! 2. 조건이 있으면 적용
//! 3. 정렬이 있으면 적용 (기본 오름차순)
//! 4. 페이지 조회면 `(page - 1) * size` 만큼 건너뛰고 `size` 만큼 취함
//! 5. 실행 후 include 지시자를 순서대로 적용
//! 6. 읽기 전용이 아니면 각 행을 변경 추적기에 등록
//!
//! 인자 오류는 어떤 쿼리도 실행하기 전에 반환됩니다.

use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, Condition, DbErr, EntityTrait, IntoActiveModel, Iterable, ModelTrait,
    PaginatorTrait, PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select,
};

use super::error::{RepositoryError, RepositoryResult};
use super::query::{Page, PagedResult, QuerySpec};
use crate::db::DbContext;

pub struct Repository<E: EntityTrait> {
    ctx: Arc<DbContext>,
    _entity: PhantomData<E>,
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Clone + Send + Sync + 'static,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
{
    pub fn new(ctx: Arc<DbContext>) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    pub fn context(&self) -> &Arc<DbContext> {
        &self.ctx
    }

    fn entity_name() -> &'static str {
        std::any::type_name::<E>()
    }

    /// 엔티티를 추가하고 즉시 커밋합니다.
    pub async fn add(&self, entity: E::Model) -> RepositoryResult<()> {
        self.stage_insert(entity.clone());
        self.ctx.save_changes().await?;
        self.ctx.track::<E>(&entity);
        Ok(())
    }

    /// 여러 엔티티를 한 번의 커밋으로 추가합니다.
    pub async fn add_many(&self, entities: Vec<E::Model>) -> RepositoryResult<()> {
        if entities.is_empty() {
            return Err(RepositoryError::argument(
                "entities",
                "at least one entity is required",
            ));
        }

        for entity in &entities {
            self.stage_insert(entity.clone());
        }
        self.ctx.save_changes().await?;

        for entity in &entities {
            self.ctx.track::<E>(entity);
        }
        log::debug!("{}개 행 추가: {}", entities.len(), Self::entity_name());
        Ok(())
    }

    /// 엔티티를 갱신합니다.
    ///
    /// 추적 중인 행이면 스냅샷과 달라진 컬럼만 기록하며, 달라진 컬럼이 없으면
    /// 행 존재 여부만 확인합니다. 추적되지 않은 행은 전체 컬럼을 기록합니다.
    /// 대상 행이 없으면 어느 경우든 [`RepositoryError::Persistence`]로 실패합니다.
    pub async fn update(&self, entity: E::Model) -> RepositoryResult<()> {
        let mut active = entity.clone().into_active_model();

        match self.ctx.snapshot::<E>(&entity) {
            Some(before) => {
                let mut changed = 0;
                for column in E::Column::iter() {
                    let value = entity.get(column);
                    if before.get(column) != value {
                        active.set(column, value);
                        changed += 1;
                    }
                }
                if changed == 0 {
                    log::debug!("변경된 컬럼 없음: {}", Self::entity_name());
                    // 기록할 문장이 없어도 대상 행은 존재해야 합니다.
                    if !self.exists(primary_key_condition::<E>(&entity)).await? {
                        return Err(RepositoryError::Persistence(DbErr::RecordNotUpdated));
                    }
                    return Ok(());
                }
            }
            None => active = active.reset_all(),
        }

        let statement = E::update_many()
            .set(active)
            .filter(primary_key_condition::<E>(&entity))
            .build(self.ctx.backend());
        self.ctx.stage(statement, true);
        self.ctx.save_changes().await?;
        self.ctx.track::<E>(&entity);
        Ok(())
    }

    /// 엔티티를 삭제합니다.
    pub async fn remove(&self, entity: E::Model) -> RepositoryResult<()> {
        let statement = E::delete_many()
            .filter(primary_key_condition::<E>(&entity))
            .build(self.ctx.backend());
        self.ctx.stage(statement, true);
        self.ctx.save_changes().await?;
        self.ctx.forget::<E>(&entity);
        Ok(())
    }

    pub async fn exists(&self, filter: Condition) -> RepositoryResult<bool> {
        let count = E::find()
            .filter(filter)
            .count(self.ctx.connection())
            .await?;
        Ok(count > 0)
    }

    pub async fn count(&self, filter: Option<Condition>) -> RepositoryResult<u64> {
        let mut select = E::find();
        if let Some(condition) = filter {
            select = select.filter(condition);
        }
        Ok(select.count(self.ctx.connection()).await?)
    }

    pub async fn get_first(&self, spec: QuerySpec<E>) -> RepositoryResult<Option<E::Model>> {
        let select = Self::compose(&spec).limit(1);
        let rows = self.fetch(select, &spec).await?;
        Ok(rows.into_iter().next())
    }

    /// 정확히 한 건을 기대하는 조회
    ///
    /// 두 건 이상이 일치하면 [`RepositoryError::AmbiguousResult`]를 반환합니다.
    pub async fn get_single(&self, spec: QuerySpec<E>) -> RepositoryResult<Option<E::Model>> {
        let rows = Self::compose(&spec)
            .limit(2)
            .all(self.ctx.connection())
            .await?;

        if rows.len() > 1 {
            return Err(RepositoryError::AmbiguousResult {
                entity: Self::entity_name(),
            });
        }

        let rows = self.finish(rows, &spec).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn get_all(&self, spec: QuerySpec<E>) -> RepositoryResult<Vec<E::Model>> {
        let select = Self::compose(&spec);
        self.fetch(select, &spec).await
    }

    /// 페이지 단위 조회
    ///
    /// 전체 건수(include와 정렬 없이)와 요청한 페이지의 행들을 반환합니다.
    pub async fn get_all_paged(
        &self,
        spec: QuerySpec<E>,
        page: Page,
    ) -> RepositoryResult<PagedResult<E::Model>> {
        let offset = page.offset()?;
        if !spec.has_order() {
            return Err(RepositoryError::argument(
                "order",
                "paged queries require an ordering key",
            ));
        }

        let total = self.count(spec.filter.clone()).await?;
        let select = Self::compose(&spec).offset(offset).limit(page.size);
        let items = self.fetch(select, &spec).await?;

        log::debug!(
            "페이지 조회 {}: page={}, size={}, total={}",
            Self::entity_name(),
            page.number,
            page.size,
            total
        );
        Ok(PagedResult { total, items })
    }

    fn compose(spec: &QuerySpec<E>) -> Select<E> {
        let mut select = E::find();
        if let Some(condition) = &spec.filter {
            select = select.filter(condition.clone());
        }
        if let Some((column, order)) = &spec.order {
            select = select.order_by(*column, order.clone());
        }
        select
    }

    async fn fetch(&self, select: Select<E>, spec: &QuerySpec<E>) -> RepositoryResult<Vec<E::Model>> {
        let rows = select.all(self.ctx.connection()).await?;
        self.finish(rows, spec).await
    }

    /// include 지시자 적용 후 추적 등록
    async fn finish(
        &self,
        mut rows: Vec<E::Model>,
        spec: &QuerySpec<E>,
    ) -> RepositoryResult<Vec<E::Model>> {
        for include in &spec.includes {
            include.load(self.ctx.connection(), &mut rows).await?;
        }

        if !spec.read_only {
            for row in &rows {
                self.ctx.track::<E>(row);
            }
        }
        Ok(rows)
    }

    fn stage_insert(&self, entity: E::Model) {
        let active = entity.into_active_model().reset_all();
        let statement = E::insert(active).build(self.ctx.backend());
        self.ctx.stage(statement, false);
    }
}

/// 모델의 기본 키 값으로 `pk = value` 조건을 만듭니다.
fn primary_key_condition<E: EntityTrait>(model: &E::Model) -> Condition {
    E::PrimaryKey::iter().fold(Condition::all(), |condition, key| {
        let column = key.into_column();
        condition.add(sea_orm::ColumnTrait::eq(&column, model.get(column)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_database;
    use crate::domain::entities::catalog::{category, product};
    use crate::domain::entities::AuditedEntity;
    use sea_orm::ColumnTrait;

    async fn setup() -> (Repository<category::Entity>, Repository<product::Entity>) {
        let database = memory_database().await;
        let ctx = Arc::new(DbContext::new(database.connection().clone()));
        (Repository::new(ctx.clone()), Repository::new(ctx))
    }

    async fn seed_products(
        categories: &Repository<category::Entity>,
        products: &Repository<product::Entity>,
        count: usize,
    ) -> category::Model {
        let category = category::Model::new("tools", None, "seed");
        categories.add(category.clone()).await.unwrap();

        let rows = (0..count)
            .map(|i| product::Model::new(category.id, format!("item-{:02}", i), i as i64, "seed"))
            .collect();
        products.add_many(rows).await.unwrap();
        category
    }

    #[actix_web::test]
    async fn test_add_then_get_first_returns_equal_entity() {
        let (categories, _) = setup().await;
        let category = category::Model::new("books", Some("paper".into()), "alice");
        categories.add(category.clone()).await.unwrap();

        let found = categories
            .get_first(QuerySpec::read_only().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, category.id);
        assert_eq!(found.user_log, "alice");
        assert_eq!(found.updated_at, category.updated_at);
        assert_eq!(found, category);
    }

    #[actix_web::test]
    async fn test_paged_query_returns_total_and_ordered_slice() {
        let (categories, products) = setup().await;
        seed_products(&categories, &products, 25).await;

        let spec = || QuerySpec::<product::Entity>::read_only().order_by(product::Column::Name);

        let first = products.get_all_paged(spec(), Page::new(1, 10)).await.unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].name, "item-00");
        assert!(first.items.windows(2).all(|w| w[0].name <= w[1].name));

        let last = products.get_all_paged(spec(), Page::new(3, 10)).await.unwrap();
        assert_eq!(last.total, 25);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].name, "item-20");
    }

    #[actix_web::test]
    async fn test_paged_query_descending_order() {
        let (categories, products) = setup().await;
        seed_products(&categories, &products, 3).await;

        let page = products
            .get_all_paged(
                QuerySpec::read_only().order_by_desc(product::Column::Name),
                Page::new(1, 2),
            )
            .await
            .unwrap();

        assert_eq!(page.items[0].name, "item-02");
        assert_eq!(page.items[1].name, "item-01");
    }

    #[actix_web::test]
    async fn test_get_single_ambiguity() {
        let (categories, products) = setup().await;
        let category = seed_products(&categories, &products, 2).await;

        let many = products
            .get_single(QuerySpec::read_only().filter(product::Column::CategoryId.eq(category.id)))
            .await;
        assert!(matches!(many, Err(RepositoryError::AmbiguousResult { .. })));

        let none = products
            .get_single(QuerySpec::read_only().filter(product::Column::Name.eq("missing")))
            .await
            .unwrap();
        assert!(none.is_none());

        let one = products
            .get_single(QuerySpec::read_only().filter(product::Column::Name.eq("item-01")))
            .await
            .unwrap();
        assert_eq!(one.unwrap().name, "item-01");
    }

    #[actix_web::test]
    async fn test_add_many_rejects_empty_input() {
        let (_, products) = setup().await;

        let result = products.add_many(Vec::new()).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Argument { argument: "entities", .. })
        ));
        assert_eq!(products.context().pending_changes(), 0);
    }

    #[actix_web::test]
    async fn test_invalid_paging_fails_before_query() {
        let database = memory_database().await;
        let ctx = Arc::new(DbContext::new(database.connection().clone()));
        let products: Repository<product::Entity> = Repository::new(ctx);
        // 연결이 끊긴 상태에서도 인자 오류가 먼저 반환되어야 합니다.
        database.connection().clone().close().await.unwrap();

        let page_zero = products
            .get_all_paged(
                QuerySpec::read_only().order_by(product::Column::Name),
                Page::new(0, 10),
            )
            .await;
        assert!(matches!(
            page_zero,
            Err(RepositoryError::Argument { argument: "page", .. })
        ));

        let size_zero = products
            .get_all_paged(
                QuerySpec::read_only().order_by(product::Column::Name),
                Page::new(1, 0),
            )
            .await;
        assert!(matches!(
            size_zero,
            Err(RepositoryError::Argument { argument: "size", .. })
        ));

        let unordered = products
            .get_all_paged(QuerySpec::read_only(), Page::new(1, 10))
            .await;
        assert!(matches!(
            unordered,
            Err(RepositoryError::Argument { argument: "order", .. })
        ));
    }

    #[actix_web::test]
    async fn test_read_only_queries_are_not_tracked_or_persisted() {
        let (categories, _) = setup().await;
        let category = category::Model::new("games", None, "alice");
        categories.add(category.clone()).await.unwrap();
        categories.context().forget::<category::Entity>(&category);

        let mut found = categories
            .get_first(QuerySpec::read_only().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(categories.context().tracked_count(), 0);

        found.name = "mutated".to_string();
        assert_eq!(categories.context().pending_changes(), 0);
        assert_eq!(categories.context().save_changes().await.unwrap(), 0);

        let reloaded = categories
            .get_first(QuerySpec::read_only().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.name, "games");
    }

    #[actix_web::test]
    async fn test_tracked_update_writes_changed_columns() {
        let (categories, _) = setup().await;
        let category = category::Model::new("music", None, "alice");
        categories.add(category.clone()).await.unwrap();

        let mut tracked = categories
            .get_first(QuerySpec::tracked().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(categories.context().is_tracked::<category::Entity>(&tracked));

        tracked.name = "audio".to_string();
        tracked.touch("bob");
        categories.update(tracked.clone()).await.unwrap();

        let reloaded = categories
            .get_first(QuerySpec::read_only().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.name, "audio");
        assert_eq!(reloaded.user_log, "bob");

        // 스냅샷이 기록된 상태로 갱신되었으므로 같은 모델 재갱신은 문장이 없습니다.
        categories.update(tracked).await.unwrap();
        assert_eq!(categories.context().pending_changes(), 0);
    }

    #[actix_web::test]
    async fn test_untracked_update_writes_full_row() {
        let (categories, _) = setup().await;
        let category = category::Model::new("garden", None, "alice");
        categories.add(category.clone()).await.unwrap();
        categories.context().forget::<category::Entity>(&category);

        let mut changed = category.clone();
        changed.description = Some("outdoor".to_string());
        categories.update(changed).await.unwrap();

        let reloaded = categories
            .get_first(QuerySpec::read_only().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.description.as_deref(), Some("outdoor"));
    }

    #[actix_web::test]
    async fn test_update_of_missing_row_is_persistence_error() {
        let (categories, _) = setup().await;
        let ghost = category::Model::new("ghost", None, "alice");

        let result = categories.update(ghost).await;

        assert!(matches!(result, Err(RepositoryError::Persistence(_))));
    }

    #[actix_web::test]
    async fn test_remove_deletes_and_forgets() {
        let (categories, _) = setup().await;
        let category = category::Model::new("toys", None, "alice");
        categories.add(category.clone()).await.unwrap();

        categories.remove(category.clone()).await.unwrap();

        assert!(!categories
            .exists(Condition::all().add(category::Column::Id.eq(category.id)))
            .await
            .unwrap());
        assert!(!categories.context().is_tracked::<category::Entity>(&category));
    }

    #[actix_web::test]
    async fn test_count_and_exists() {
        let (categories, products) = setup().await;
        let category = seed_products(&categories, &products, 4).await;

        assert_eq!(products.count(None).await.unwrap(), 4);
        assert_eq!(
            products
                .count(Some(Condition::all().add(product::Column::PriceCents.gte(2))))
                .await
                .unwrap(),
            2
        );
        assert!(products
            .exists(Condition::all().add(product::Column::CategoryId.eq(category.id)))
            .await
            .unwrap());
    }

    #[actix_web::test]
    async fn test_include_loads_related_category() {
        let (categories, products) = setup().await;
        let category = seed_products(&categories, &products, 2).await;

        let rows = products
            .get_all(
                QuerySpec::read_only()
                    .include(product::include_category())
                    .order_by(product::Column::Name),
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|p| p.category.as_ref() == Some(&category)));

        let plain = products
            .get_all(QuerySpec::read_only().order_by(product::Column::Name))
            .await
            .unwrap();
        assert!(plain.iter().all(|p| p.category.is_none()));
    }

    #[actix_web::test]
    async fn test_unchanged_update_of_deleted_row_fails() {
        let (categories, _) = setup().await;
        let category = category::Model::new("films", None, "alice");
        categories.add(category.clone()).await.unwrap();

        let tracked = categories
            .get_first(QuerySpec::tracked().filter(category::Column::Id.eq(category.id)))
            .await
            .unwrap()
            .unwrap();

        let other: Repository<category::Entity> = Repository::new(Arc::new(DbContext::new(
            categories.context().connection().clone(),
        )));
        other.remove(category.clone()).await.unwrap();

        let result = categories.update(tracked).await;
        assert!(matches!(result, Err(RepositoryError::Persistence(_))));
    }

    #[actix_web::test]
    async fn test_oversized_page_is_argument_error() {
        let (categories, products) = setup().await;
        seed_products(&categories, &products, 2).await;

        let result = products
            .get_all_paged(
                QuerySpec::read_only().order_by(product::Column::Name),
                Page::new(100_000_000_000_000_000, 100),
            )
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Argument { argument: "page", .. })
        ));
    }

    #[actix_web::test]
    async fn test_with_cancellation_stops_running_operation() {
        use super::super::error::with_cancellation;
        use tokio::sync::Notify;
        use tokio_util::sync::CancellationToken;

        let (categories, _) = setup().await;
        let token = CancellationToken::new();
        let started = Notify::new();
        let released = Notify::new();

        let operation = async {
            started.notify_one();
            released.notified().await;
            categories.count(None).await
        };
        let cancel = async {
            started.notified().await;
            token.cancel();
        };

        let (result, ()) =
            futures_util::future::join(with_cancellation(&token, operation), cancel).await;

        assert!(matches!(result, Err(RepositoryError::Cancelled)));
        assert_eq!(categories.count(None).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_with_cancellation_returns_cancelled() {
        use super::super::error::with_cancellation;
        use tokio_util::sync::CancellationToken;

        let (categories, _) = setup().await;
        let token = CancellationToken::new();
        token.cancel();

        let result = with_cancellation(&token, categories.count(None)).await;

        assert!(matches!(result, Err(RepositoryError::Cancelled)));
    }
}
