//! 基于 sqlx 的存储实现

pub mod category;
pub mod product;

pub use category::SqlCategoryRepository;
pub use product::SqlProductRepository;
