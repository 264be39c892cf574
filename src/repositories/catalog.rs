//! 카탈로그 엔티티용 리포지토리 등록
//!
//! `Repository<category::Entity>`와 `Repository<product::Entity>`를 요청 스코프
//! 데이터 핸들러로 등록합니다. 두 리포지토리는 같은 요청의 `DbContext`를 공유합니다.

use std::sync::Arc;

use crate::core::registry::{Bucket, ComponentRegistration, RegistryBuilder};
use crate::db::DbContext;
use crate::domain::entities::catalog::{category, product};
use crate::repositories::generic::Repository;

pub type CategoryRepository = Repository<category::Entity>;
pub type ProductRepository = Repository<product::Entity>;

fn register(builder: &mut RegistryBuilder) {
    builder
        .scoped::<CategoryRepository, _>(Bucket::DataHandlers, "CategoryRepository", |scope| {
            Ok(Arc::new(Repository::new(scope.resolve::<DbContext>()?)))
        })
        .scoped::<ProductRepository, _>(Bucket::DataHandlers, "ProductRepository", |scope| {
            Ok(Arc::new(Repository::new(scope.resolve::<DbContext>()?)))
        });
}

inventory::submit! {
    ComponentRegistration {
        bucket: Bucket::DataHandlers,
        name: "CatalogRepositories",
        register,
    }
}
