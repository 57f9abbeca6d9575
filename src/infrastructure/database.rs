//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::{path::Path, str::FromStr, time::Duration};
use tracing::info;

use crate::config::DatabaseConfig;

pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 建立连接池并创建表结构
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        info!("Connecting to database: {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // 内存库的数据只存在于单个连接上，连接不能被回收
        let pool = if config.url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = database_file(&config.url).and_then(|p| p.parent()) {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(Error::Io)?;
                }
            }
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
                .connect_with(options)
                .await?
        };

        create_tables(&pool).await?;

        Ok(Self { pool })
    }

    /// 测试用内存库
    pub async fn in_memory() -> Result<Self, Error> {
        Self::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        })
        .await
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// 从 `sqlite://path?mode=rwc` 形式的连接串中取出文件路径
fn database_file(url: &str) -> Option<&Path> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then(|| Path::new(path))
}

// 创建数据库表
async fn create_tables(pool: &SqlitePool) -> Result<(), Error> {
    info!("Creating database tables...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            price TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS seed_history (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database tables created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_file_from_url() {
        assert_eq!(
            database_file("sqlite://data/catalog.db?mode=rwc"),
            Some(Path::new("data/catalog.db"))
        );
        assert_eq!(database_file("sqlite:catalog.db"), Some(Path::new("catalog.db")));
        assert_eq!(database_file("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = DatabaseManager::in_memory().await.unwrap();
        create_tables(db.get_pool()).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.get_pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["categories", "products", "seed_history"]);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = DatabaseManager::in_memory().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO products (name, price, category_id) VALUES ('Orphan', '1.00', 999)",
        )
        .execute(db.get_pool())
        .await;
        assert!(result.is_err());
    }
}
