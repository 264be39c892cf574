//! 카테고리 커맨드 핸들러

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::commands::{CreateCategory, DeleteCategory, GetCategory, ListCategories, UpdateCategory};
use crate::core::errors::AppResult;
use crate::core::registry::{Bucket, ComponentRegistration, RegistryBuilder};
use crate::domain::dto::catalog::CategoryResponse;
use crate::domain::handlers::{rejected, CommandHandler, INVALID_REQUEST};
use crate::domain::models::CommandResult;
use crate::services::catalog::CategoryService;

const DUPLICATE_NAME: &str = "이미 존재하는 카테고리 이름입니다";

pub struct CategoryHandler {
    categories: Arc<CategoryService>,
}

impl CategoryHandler {
    pub fn new(categories: Arc<CategoryService>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CommandHandler<ListCategories> for CategoryHandler {
    type Output = Vec<CategoryResponse>;

    async fn handle(&self, _command: ListCategories) -> AppResult<CommandResult<Self::Output>> {
        let categories: Vec<CategoryResponse> = self
            .categories
            .list()
            .await?
            .into_iter()
            .map(CategoryResponse::from)
            .collect();
        let total = categories.len() as u64;

        Ok(CommandResult::ok_with_total(categories, total))
    }
}

#[async_trait]
impl CommandHandler<GetCategory> for CategoryHandler {
    type Output = CategoryResponse;

    async fn handle(&self, command: GetCategory) -> AppResult<CommandResult<Self::Output>> {
        let category = self.categories.find(command.id).await?;
        Ok(CommandResult::ok(category.into()))
    }
}

#[async_trait]
impl CommandHandler<CreateCategory> for CategoryHandler {
    type Output = ();

    async fn handle(&self, command: CreateCategory) -> AppResult<CommandResult<Self::Output>> {
        let CreateCategory { request, user_log } = command;
        if let Err(errors) = request.validate() {
            return Ok(rejected(&errors));
        }
        let name = request.name.trim().to_string();
        if self.categories.name_taken(&name, None).await? {
            return Ok(CommandResult::bad_request(
                INVALID_REQUEST,
                vec![format!("name: {}", DUPLICATE_NAME)],
            ));
        }

        let category = self
            .categories
            .create(name, request.description, &user_log)
            .await?;
        Ok(CommandResult::created(category.id))
    }
}

#[async_trait]
impl CommandHandler<UpdateCategory> for CategoryHandler {
    type Output = CategoryResponse;

    async fn handle(&self, command: UpdateCategory) -> AppResult<CommandResult<Self::Output>> {
        let UpdateCategory {
            id,
            request,
            user_log,
        } = command;
        if let Err(errors) = request.validate() {
            return Ok(rejected(&errors));
        }
        let name = request.name.trim().to_string();
        if self.categories.name_taken(&name, Some(id)).await? {
            return Ok(CommandResult::bad_request(
                INVALID_REQUEST,
                vec![format!("name: {}", DUPLICATE_NAME)],
            ));
        }

        let category = self
            .categories
            .update(id, name, request.description, &user_log)
            .await?;
        Ok(CommandResult::ok(category.into()))
    }
}

#[async_trait]
impl CommandHandler<DeleteCategory> for CategoryHandler {
    type Output = ();

    async fn handle(&self, command: DeleteCategory) -> AppResult<CommandResult<Self::Output>> {
        // 존재 여부를 먼저 확인해야 404가 400보다 우선합니다.
        self.categories.find(command.id).await?;
        if self.categories.has_products(command.id).await? {
            return Ok(CommandResult::bad_request(
                "상품이 남아 있는 카테고리는 삭제할 수 없습니다",
                vec![],
            ));
        }

        self.categories.delete(command.id).await?;
        Ok(CommandResult::ok(()))
    }
}

fn register(builder: &mut RegistryBuilder) {
    builder.scoped::<CategoryHandler, _>(Bucket::DomainHandlers, "CategoryHandler", |scope| {
        Ok(Arc::new(CategoryHandler::new(scope.resolve()?)))
    });
}

inventory::submit! {
    ComponentRegistration {
        bucket: Bucket::DomainHandlers,
        name: "CategoryHandler",
        register,
    }
}
