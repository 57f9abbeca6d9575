//! 分类业务服务

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use super::model::{Category, CategoryDraft, CategoryRequest};
use crate::app::product::model::ProductRepository;
use crate::core::error::AppError;
use crate::core::pagination::{Page, PageRequest};
use crate::core::repository::{Entity, Repository};

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn Repository<Category>>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn Repository<Category>>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub async fn list(&self, request: PageRequest) -> Result<Page<Category>, AppError> {
        Ok(self.categories.find_all(request).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let category = self.categories.find_by_id(id).await?;
        if category.is_none() {
            debug!("Category {} not found", id);
        }
        Ok(category)
    }

    pub async fn create(&self, request: CategoryRequest) -> Result<Category, AppError> {
        let draft = into_draft(request)?;
        let category = self.categories.insert(draft).await?;
        info!("Created category: {} ({})", category.name, category.id());
        Ok(category)
    }

    /// 整体替换；id 不存在时返回 `None`
    pub async fn update(
        &self,
        id: i64,
        request: CategoryRequest,
    ) -> Result<Option<Category>, AppError> {
        let draft = into_draft(request)?;
        let updated = self.categories.replace(id, draft).await?;
        match &updated {
            Some(category) => info!("Updated category: {} ({})", category.name, category.id()),
            None => debug!("Category {} not found for update", id),
        }
        Ok(updated)
    }

    /// 仍被产品引用的分类不允许删除
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        if self.categories.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let referencing = self.products.count_by_category(id).await?;
        if referencing > 0 {
            warn!(
                "Refusing to delete category {}: referenced by {} products",
                id, referencing
            );
            return Err(AppError::Conflict(format!(
                "category {} is still referenced by {} product(s)",
                id, referencing
            )));
        }

        // 计数与删除之间可能插入新产品，由外键约束兜底
        let deleted = match self.categories.delete_by_id(id).await {
            Ok(deleted) => deleted,
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                warn!("Refusing to delete category {}: foreign key violation", id);
                return Err(AppError::Conflict(format!(
                    "category {} is still referenced by product(s)",
                    id
                )));
            }
            Err(e) => return Err(e.into()),
        };
        if deleted {
            info!("Deleted category: {}", id);
        }
        Ok(deleted)
    }
}

fn into_draft(request: CategoryRequest) -> Result<CategoryDraft, AppError> {
    request.validate()?;

    // 名称按原样保存，只拒绝全空白
    let name = request.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(AppError::invalid_field("name", "name must not be blank"));
    }

    Ok(CategoryDraft {
        name,
        description: request.description,
    })
}
