//! 카탈로그(카테고리, 상품) API 요청/응답 DTO

pub mod request;
pub mod response;

pub use request::{
    CategoryRequest, ListProductsQuery, ProductBatchRequest, ProductRequest, ProductSortKey,
};
pub use response::{CategoryResponse, ProductResponse};
