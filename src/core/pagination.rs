//! 分页模型

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::config::PaginationConfig;

/// 分页请求（页码从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

/// 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListQuery {
    /// 按配置补默认值并截断 size 上限
    pub fn resolve(&self, config: &PaginationConfig) -> Result<PageRequest, AppError> {
        let size = self.size.unwrap_or(config.default_size);
        if size == 0 {
            return Err(AppError::invalid_field("size", "size must be at least 1"));
        }

        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            size.min(config.max_size),
        ))
    }
}

/// 一页数据及总数
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        ((self.total.max(0) as u64 + self.size as u64 - 1) / self.size as u64) as u32
    }
}

// 分页响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub size: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl<T> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            pagination: PaginationInfo {
                page: page.page,
                size: page.size,
                total: page.total,
                total_pages,
            },
            data: page.items,
        }
    }
}
