//! 分类表的 SQLite 实现

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::app::category::model::{Category, CategoryDraft};
use crate::core::pagination::{Page, PageRequest};
use crate::core::repository::{Repository, StoreResult};

#[derive(Clone)]
pub struct SqlCategoryRepository {
    pool: SqlitePool,
}

impl SqlCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Category> for SqlCategoryRepository {
    async fn insert(&self, draft: CategoryDraft) -> StoreResult<Category> {
        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?, ?)")
            .bind(&draft.name)
            .bind(&draft.description)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: draft.name,
            description: draft.description,
        })
    }

    async fn replace(&self, id: i64, draft: CategoryDraft) -> StoreResult<Option<Category>> {
        let result = sqlx::query("UPDATE categories SET name = ?, description = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Category {
            id,
            name: draft.name,
            description: draft.description,
        }))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_all(&self, request: PageRequest) -> StoreResult<Page<Category>> {
        let items = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = self.count().await?;
        Ok(Page::new(items, total, request))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
    }
}
