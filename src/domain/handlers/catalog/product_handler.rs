//! 상품 커맨드 핸들러

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::commands::{
    CreateProduct, CreateProductsBatch, DeleteProduct, GetProduct, ListProducts, UpdateProduct,
};
use crate::core::errors::AppResult;
use crate::core::registry::{Bucket, ComponentRegistration, RegistryBuilder};
use crate::domain::dto::catalog::{ProductRequest, ProductResponse};
use crate::domain::handlers::{rejected, CommandHandler, INVALID_REQUEST};
use crate::domain::models::CommandResult;
use crate::repositories::generic::Page;
use crate::services::catalog::{
    CategoryService, ProductChanges, ProductListCriteria, ProductService,
};

pub struct ProductHandler {
    products: Arc<ProductService>,
    categories: Arc<CategoryService>,
}

impl ProductHandler {
    pub fn new(products: Arc<ProductService>, categories: Arc<CategoryService>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// 존재하지 않는 카테고리 ID 목록 (정렬됨)
    async fn missing_categories(
        &self,
        ids: impl IntoIterator<Item = Uuid>,
    ) -> AppResult<Vec<Uuid>> {
        let mut missing = Vec::new();
        for id in ids.into_iter().collect::<BTreeSet<_>>() {
            if !self.categories.exists(id).await? {
                missing.push(id);
            }
        }
        Ok(missing)
    }
}

fn changes(request: ProductRequest) -> ProductChanges {
    ProductChanges {
        category_id: request.category_id,
        name: request.name.trim().to_string(),
        price_cents: request.price_cents,
    }
}

fn unknown_categories<T>(missing: &[Uuid]) -> CommandResult<T> {
    CommandResult::bad_request(
        INVALID_REQUEST,
        missing
            .iter()
            .map(|id| format!("category_id: 카테고리가 존재하지 않습니다 ({})", id))
            .collect(),
    )
}

#[async_trait]
impl CommandHandler<ListProducts> for ProductHandler {
    type Output = Vec<ProductResponse>;

    async fn handle(&self, command: ListProducts) -> AppResult<CommandResult<Self::Output>> {
        let query = command.query;
        if let Err(errors) = query.validate() {
            return Ok(rejected(&errors));
        }

        let page = Page::new(query.page(), query.size());
        let criteria = ProductListCriteria {
            category_id: query.category_id,
            search: query.search,
            sort: query.sort.unwrap_or_default(),
            descending: query.desc.unwrap_or(false),
        };
        let result = self.products.list(&criteria, page).await?;

        let items = result.items.into_iter().map(ProductResponse::from).collect();
        Ok(CommandResult::ok_with_total(items, result.total))
    }
}

#[async_trait]
impl CommandHandler<GetProduct> for ProductHandler {
    type Output = ProductResponse;

    async fn handle(&self, command: GetProduct) -> AppResult<CommandResult<Self::Output>> {
        let product = self.products.find(command.id).await?;
        Ok(CommandResult::ok(product.into()))
    }
}

#[async_trait]
impl CommandHandler<CreateProduct> for ProductHandler {
    type Output = ();

    async fn handle(&self, command: CreateProduct) -> AppResult<CommandResult<Self::Output>> {
        let CreateProduct { request, user_log } = command;
        if let Err(errors) = request.validate() {
            return Ok(rejected(&errors));
        }
        let missing = self.missing_categories([request.category_id]).await?;
        if !missing.is_empty() {
            return Ok(unknown_categories(&missing));
        }

        let product = self.products.create(changes(request), &user_log).await?;
        Ok(CommandResult::created(product.id))
    }
}

#[async_trait]
impl CommandHandler<CreateProductsBatch> for ProductHandler {
    /// 생성된 상품 ID 목록 (요청 순서)
    type Output = Vec<Uuid>;

    async fn handle(&self, command: CreateProductsBatch) -> AppResult<CommandResult<Self::Output>> {
        let CreateProductsBatch { request, user_log } = command;
        if let Err(errors) = request.validate() {
            return Ok(rejected(&errors));
        }
        let missing = self
            .missing_categories(request.items.iter().map(|item| item.category_id))
            .await?;
        if !missing.is_empty() {
            return Ok(unknown_categories(&missing));
        }

        let batch = request.items.into_iter().map(changes).collect();
        let ids: Vec<Uuid> = self
            .products
            .create_many(batch, &user_log)
            .await?
            .into_iter()
            .map(|product| product.id)
            .collect();
        let total = ids.len() as u64;

        Ok(CommandResult::ok_with_total(ids, total))
    }
}

#[async_trait]
impl CommandHandler<UpdateProduct> for ProductHandler {
    type Output = ProductResponse;

    async fn handle(&self, command: UpdateProduct) -> AppResult<CommandResult<Self::Output>> {
        let UpdateProduct {
            id,
            request,
            user_log,
        } = command;
        if let Err(errors) = request.validate() {
            return Ok(rejected(&errors));
        }
        let missing = self.missing_categories([request.category_id]).await?;
        if !missing.is_empty() {
            return Ok(unknown_categories(&missing));
        }

        let product = self.products.update(id, changes(request), &user_log).await?;
        Ok(CommandResult::ok(product.into()))
    }
}

#[async_trait]
impl CommandHandler<DeleteProduct> for ProductHandler {
    type Output = ();

    async fn handle(&self, command: DeleteProduct) -> AppResult<CommandResult<Self::Output>> {
        self.products.delete(command.id).await?;
        Ok(CommandResult::ok(()))
    }
}

fn register(builder: &mut RegistryBuilder) {
    builder.scoped::<ProductHandler, _>(Bucket::DomainHandlers, "ProductHandler", |scope| {
        Ok(Arc::new(ProductHandler::new(scope.resolve()?, scope.resolve()?)))
    });
}

inventory::submit! {
    ComponentRegistration {
        bucket: Bucket::DomainHandlers,
        name: "ProductHandler",
        register,
    }
}
