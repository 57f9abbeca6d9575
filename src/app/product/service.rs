//! 产品业务服务

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};
use validator::Validate;

use super::model::{Product, ProductDraft, ProductRepository, ProductRequest};
use crate::app::category::model::Category;
use crate::core::error::AppError;
use crate::core::pagination::{Page, PageRequest};
use crate::core::repository::{Entity, Repository};

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn Repository<Category>>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn Repository<Category>>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn list(&self, request: PageRequest) -> Result<Page<Product>, AppError> {
        Ok(self.products.find_all(request).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = self.products.find_by_id(id).await?;
        if product.is_none() {
            debug!("Product {} not found", id);
        }
        Ok(product)
    }

    pub async fn create(&self, request: ProductRequest) -> Result<Product, AppError> {
        let draft = self.into_draft(request).await?;
        let product = self.products.insert(draft).await?;
        info!(
            "Created product: {} ({}) in category {}",
            product.name,
            product.id(),
            product.category.id()
        );
        Ok(product)
    }

    /// 整体替换；id 不存在时返回 `None`
    pub async fn update(
        &self,
        id: i64,
        request: ProductRequest,
    ) -> Result<Option<Product>, AppError> {
        let draft = self.into_draft(request).await?;
        let updated = self.products.replace(id, draft).await?;
        match &updated {
            Some(product) => info!("Updated product: {} ({})", product.name, product.id()),
            None => debug!("Product {} not found for update", id),
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.products.delete_by_id(id).await?;
        if deleted {
            info!("Deleted product: {}", id);
        } else {
            debug!("Product {} not found for delete", id);
        }
        Ok(deleted)
    }

    /// 校验请求并确认引用的分类存在
    async fn into_draft(&self, request: ProductRequest) -> Result<ProductDraft, AppError> {
        request.validate()?;

        let name = request.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(AppError::invalid_field("name", "name must not be blank"));
        }

        let price = request.price.unwrap_or_default();
        if price < Decimal::ZERO {
            return Err(AppError::invalid_field("price", "price must not be negative"));
        }

        let category_id = match request.category {
            Some(category) => category.id,
            None => return Err(AppError::invalid_field("category", "category is required")),
        };
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(AppError::invalid_field(
                "category",
                format!("category {} does not exist", category_id),
            ));
        }

        Ok(ProductDraft {
            name,
            description: request.description,
            price,
            category_id,
        })
    }
}
