//! # 商品目录服务
//!
//! 分类与产品两类实体的 REST 接口，数据存放在 SQLite 中：
//! - `app`：路由、处理器与业务服务
//! - `core`：错误、分页、存储抽象与中间件
//! - `infrastructure`：连接池、表结构、sqlx 存储实现、示例数据、日志
//! - `config`：TOML 配置与环境变量覆盖

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_app, AppState};
pub use config::Config;
