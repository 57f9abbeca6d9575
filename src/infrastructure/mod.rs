//! 基础设施层：数据库、存储实现、示例数据与日志

pub mod database;
pub mod logger;
pub mod repository;
pub mod seed;
