//! 产品表的 SQLite 实现

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::app::category::model::Category;
use crate::app::product::model::{Product, ProductDraft, ProductRepository};
use crate::core::pagination::{Page, PageRequest};
use crate::core::repository::{Repository, StoreResult};

const SELECT_PRODUCT: &str = r#"
    SELECT p.id, p.name, p.description, p.price,
           c.id AS category_id, c.name AS category_name, c.description AS category_description
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: String,
    category_id: i64,
    category_name: String,
    category_description: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = sqlx::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        // 价格以十进制字符串存储，避免浮点误差
        let price = Decimal::from_str(&row.price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            category: Category {
                id: row.category_id,
                name: row.category_name,
                description: row.category_description,
            },
        })
    }
}

#[derive(Clone)]
pub struct SqlProductRepository {
    pool: SqlitePool,
}

impl SqlProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Product> for SqlProductRepository {
    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, category_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.to_string())
        .bind(draft.category_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn replace(&self, id: i64, draft: ProductDraft) -> StoreResult<Option<Product>> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, category_id = ? WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price.to_string())
        .bind(draft.category_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{} WHERE p.id = ?", SELECT_PRODUCT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_all(&self, request: PageRequest) -> StoreResult<Page<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{} ORDER BY p.id ASC LIMIT ? OFFSET ?",
            SELECT_PRODUCT
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let total = self.count().await?;
        Ok(Page::new(items, total, request))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
    }
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn count_by_category(&self, category_id: i64) -> StoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
    }
}
