//! 产品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Product, ProductRequest};
use crate::app::AppState;
use crate::core::error::AppError;
use crate::core::extract::{JsonBody, QueryParams};
use crate::core::pagination::{ListQuery, PaginatedResponse};

// 分页获取产品
pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<PaginatedResponse<Product>>, AppError> {
    let request = query.resolve(&state.pagination)?;
    let page = state.product_service.list(request).await?;
    Ok(Json(page.into()))
}

// 根据 ID 获取产品
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    state
        .product_service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

// 创建产品
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.product_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// 更新产品
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<Json<Product>, AppError> {
    state
        .product_service
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

// 删除产品
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.product_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
