//! # 상품 데이터 서비스
//!
//! 상품 목록의 필터, 검색, 정렬, 페이지 조회와 소속 카테고리 include를
//! 리포지토리 질의 명세([`QuerySpec`])로 조립합니다.

use std::sync::Arc;

use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Bucket, ComponentRegistration, RegistryBuilder};
use crate::domain::dto::catalog::ProductSortKey;
use crate::domain::entities::catalog::product;
use crate::domain::entities::AuditedEntity;
use crate::repositories::catalog::ProductRepository;
use crate::repositories::generic::{Page, PagedResult, QuerySpec};

/// 상품 목록 조회 조건
#[derive(Debug, Clone, Default)]
pub struct ProductListCriteria {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
    pub sort: ProductSortKey,
    pub descending: bool,
}

impl ProductListCriteria {
    fn condition(&self) -> Condition {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());

        Condition::all()
            .add_option(self.category_id.map(|id| product::Column::CategoryId.eq(id)))
            .add_option(search.map(|term| product::Column::Name.contains(term)))
    }

    fn sort_column(&self) -> product::Column {
        match self.sort {
            ProductSortKey::Name => product::Column::Name,
            ProductSortKey::Price => product::Column::PriceCents,
            ProductSortKey::UpdatedAt => product::Column::UpdatedAt,
        }
    }
}

/// 상품 변경 값
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub category_id: Uuid,
    pub name: String,
    pub price_cents: i64,
}

pub struct ProductService {
    products: Arc<ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn list(
        &self,
        criteria: &ProductListCriteria,
        page: Page,
    ) -> AppResult<PagedResult<product::Model>> {
        let spec = QuerySpec::read_only()
            .filter(criteria.condition())
            .order(criteria.sort_column(), criteria.descending);

        Ok(self.products.get_all_paged(spec, page).await?)
    }

    /// 소속 카테고리를 포함하여 상품 하나를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 해당 ID의 상품이 없음
    pub async fn find(&self, id: Uuid) -> AppResult<product::Model> {
        let spec = QuerySpec::read_only()
            .filter(product::Column::Id.eq(id))
            .include(product::include_category());

        self.products
            .get_single(spec)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, changes: ProductChanges, user_log: &str) -> AppResult<product::Model> {
        let product =
            product::Model::new(changes.category_id, changes.name, changes.price_cents, user_log);
        self.products.add(product.clone()).await?;

        log::info!("📦 상품 생성: {} ({})", product.name, product.id);
        Ok(product)
    }

    /// 여러 상품을 한 번의 커밋으로 생성합니다.
    pub async fn create_many(
        &self,
        changes: Vec<ProductChanges>,
        user_log: &str,
    ) -> AppResult<Vec<product::Model>> {
        let products: Vec<_> = changes
            .into_iter()
            .map(|c| product::Model::new(c.category_id, c.name, c.price_cents, user_log))
            .collect();
        self.products.add_many(products.clone()).await?;

        log::info!("📦 상품 일괄 생성: {}건", products.len());
        Ok(products)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
        user_log: &str,
    ) -> AppResult<product::Model> {
        let spec = QuerySpec::tracked().filter(product::Column::Id.eq(id));
        let mut product = self
            .products
            .get_first(spec)
            .await?
            .ok_or_else(|| not_found(id))?;

        product.category_id = changes.category_id;
        product.name = changes.name;
        product.price_cents = changes.price_cents;
        product.touch(user_log);
        self.products.update(product.clone()).await?;

        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let spec = QuerySpec::read_only().filter(product::Column::Id.eq(id));
        let product = self
            .products
            .get_first(spec)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.products.remove(product).await?;

        log::info!("🗑️ 상품 삭제: {}", id);
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("상품을 찾을 수 없습니다: {}", id))
}

fn register(builder: &mut RegistryBuilder) {
    builder.scoped::<ProductService, _>(
        Bucket::DataServiceHandlers,
        "ProductService",
        |scope| Ok(Arc::new(ProductService::new(scope.resolve()?))),
    );
}

inventory::submit! {
    ComponentRegistration {
        bucket: Bucket::DataServiceHandlers,
        name: "ProductService",
        register,
    }
}
