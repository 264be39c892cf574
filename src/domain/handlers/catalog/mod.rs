//! 카탈로그 도메인 핸들러 (요청 스코프, `DomainHandlers` 버킷)

pub mod category_handler;
pub mod commands;
pub mod product_handler;

pub use category_handler::CategoryHandler;
pub use commands::*;
pub use product_handler::ProductHandler;
