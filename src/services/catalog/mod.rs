//! 카탈로그 데이터 서비스 (요청 스코프, `DataServiceHandlers` 버킷)

pub mod category_service;
pub mod product_service;

pub use category_service::CategoryService;
pub use product_service::{ProductChanges, ProductListCriteria, ProductService};
