//! 分类数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Category {
    type Draft = CategoryDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

/// 待持久化的分类内容（不含 id）
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

// 创建/更新分类请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 100, message = "name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl CategoryRequest {
    pub fn new(name: &str, description: Option<&str>) -> Self {
        Self {
            name: Some(name.to_string()),
            description: description.map(str::to_string),
        }
    }
}
