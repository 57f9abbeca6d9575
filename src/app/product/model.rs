//! 产品数据模型

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::category::model::Category;
use crate::core::repository::{Entity, Repository, StoreResult};

/// 产品，`category` 为引用分类的当前内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Category,
}

impl Entity for Product {
    type Draft = ProductDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
}

/// 请求体中的分类引用：`{"id": 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
}

// 创建/更新产品请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 100, message = "name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(required(message = "price is required"))]
    pub price: Option<Decimal>,

    #[validate(required(message = "category is required"))]
    pub category: Option<CategoryRef>,
}

impl ProductRequest {
    pub fn new(name: &str, description: Option<&str>, price: Decimal, category_id: i64) -> Self {
        Self {
            name: Some(name.to_string()),
            description: description.map(str::to_string),
            price: Some(price),
            category: Some(CategoryRef { id: category_id }),
        }
    }
}

/// 产品存储在通用能力之外还需按分类计数
#[async_trait]
pub trait ProductRepository: Repository<Product> {
    async fn count_by_category(&self, category_id: i64) -> StoreResult<i64>;
}
