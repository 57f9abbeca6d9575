//! 核心层：错误、分页、存储抽象、提取器与中间件

pub mod error;
pub mod extract;
pub mod middleware;
pub mod pagination;
pub mod repository;
