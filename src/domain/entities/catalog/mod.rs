//! 카탈로그 도메인 엔티티 (카테고리, 상품)

pub mod category;
pub mod product;
