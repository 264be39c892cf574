//! # 카테고리 데이터 서비스
//!
//! 카테고리 리포지토리와 상품 리포지토리를 조합하여 카테고리 단위의
//! 데이터 작업을 제공합니다. 응답 형태(봉투, 상태 코드)는 도메인 핸들러가 정하고,
//! 이 계층은 엔티티 조회와 저장만 담당합니다.
//!
//! ```text
//! CategoryHandler ──▶ CategoryService ──┬──▶ CategoryRepository
//!                                       └──▶ ProductRepository (삭제 가능 여부)
//! ```

use std::sync::Arc;

use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Bucket, ComponentRegistration, RegistryBuilder};
use crate::domain::entities::catalog::{category, product};
use crate::domain::entities::AuditedEntity;
use crate::repositories::catalog::{CategoryRepository, ProductRepository};
use crate::repositories::generic::QuerySpec;

pub struct CategoryService {
    categories: Arc<CategoryRepository>,
    products: Arc<ProductRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<CategoryRepository>, products: Arc<ProductRepository>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// 이름순 전체 목록
    pub async fn list(&self) -> AppResult<Vec<category::Model>> {
        let spec = QuerySpec::read_only().order_by(category::Column::Name);
        Ok(self.categories.get_all(spec).await?)
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 해당 ID의 카테고리가 없음
    pub async fn find(&self, id: Uuid) -> AppResult<category::Model> {
        let spec = QuerySpec::read_only().filter(category::Column::Id.eq(id));
        self.categories
            .get_single(spec)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let filter = Condition::all().add(category::Column::Id.eq(id));
        Ok(self.categories.exists(filter).await?)
    }

    /// 같은 이름의 다른 카테고리가 있는지 확인합니다.
    pub async fn name_taken(&self, name: &str, except: Option<Uuid>) -> AppResult<bool> {
        let filter = Condition::all()
            .add(category::Column::Name.eq(name))
            .add_option(except.map(|id| category::Column::Id.ne(id)));
        Ok(self.categories.exists(filter).await?)
    }

    /// 카테고리에 속한 상품이 하나라도 있는지 확인합니다.
    pub async fn has_products(&self, id: Uuid) -> AppResult<bool> {
        let filter = Condition::all().add(product::Column::CategoryId.eq(id));
        Ok(self.products.exists(filter).await?)
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        user_log: &str,
    ) -> AppResult<category::Model> {
        let category = category::Model::new(name, description, user_log);
        self.categories.add(category.clone()).await?;

        log::info!("📁 카테고리 생성: {} ({})", category.name, category.id);
        Ok(category)
    }

    /// 추적 조회한 카테고리를 수정합니다. 바뀐 컬럼만 기록됩니다.
    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        description: Option<String>,
        user_log: &str,
    ) -> AppResult<category::Model> {
        let spec = QuerySpec::tracked().filter(category::Column::Id.eq(id));
        let mut category = self
            .categories
            .get_first(spec)
            .await?
            .ok_or_else(|| not_found(id))?;

        category.name = name;
        category.description = description;
        category.touch(user_log);
        self.categories.update(category.clone()).await?;

        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let category = self.find(id).await?;
        self.categories.remove(category).await?;

        log::info!("🗑️ 카테고리 삭제: {}", id);
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("카테고리를 찾을 수 없습니다: {}", id))
}

fn register(builder: &mut RegistryBuilder) {
    builder.scoped::<CategoryService, _>(
        Bucket::DataServiceHandlers,
        "CategoryService",
        |scope| Ok(Arc::new(CategoryService::new(scope.resolve()?, scope.resolve()?))),
    );
}

inventory::submit! {
    ComponentRegistration {
        bucket: Bucket::DataServiceHandlers,
        name: "CategoryService",
        register,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_support::memory_database, DbContext};
    use crate::repositories::generic::Repository;

    async fn service() -> CategoryService {
        let database = memory_database().await;
        let ctx = Arc::new(DbContext::new(database.connection().clone()));
        CategoryService::new(
            Arc::new(Repository::new(ctx.clone())),
            Arc::new(Repository::new(ctx)),
        )
    }

    #[actix_web::test]
    async fn test_create_and_find() {
        let service = service().await;

        let created = service
            .create("Books".to_string(), Some("Paper".to_string()), "tester")
            .await
            .unwrap();
        let found = service.find(created.id).await.unwrap();

        assert_eq!(found.name, "Books");
        assert_eq!(found.user_log, "tester");
        assert!(service.exists(created.id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_find_missing_is_not_found() {
        let service = service().await;

        assert!(matches!(
            service.find(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_update_touches_audit_fields() {
        let service = service().await;
        let created = service.create("Books".to_string(), None, "creator").await.unwrap();

        let updated = service
            .update(created.id, "Novels".to_string(), None, "editor")
            .await
            .unwrap();
        let stored = service.find(created.id).await.unwrap();

        assert_eq!(stored.name, "Novels");
        assert_eq!(stored.user_log, "editor");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[actix_web::test]
    async fn test_name_taken_ignores_self() {
        let service = service().await;
        let created = service.create("Books".to_string(), None, "tester").await.unwrap();

        assert!(service.name_taken("Books", None).await.unwrap());
        assert!(!service.name_taken("Books", Some(created.id)).await.unwrap());
        assert!(!service.name_taken("Games", None).await.unwrap());
    }

    #[actix_web::test]
    async fn test_list_is_ordered_by_name() {
        let service = service().await;
        for name in ["Toys", "Books", "Music"] {
            service.create(name.to_string(), None, "tester").await.unwrap();
        }

        let names: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Books", "Music", "Toys"]);
    }

    #[actix_web::test]
    async fn test_delete() {
        let service = service().await;
        let created = service.create("Books".to_string(), None, "tester").await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(!service.exists(created.id).await.unwrap());
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
