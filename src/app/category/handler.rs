//! 分类处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Category, CategoryRequest};
use crate::app::AppState;
use crate::core::error::AppError;
use crate::core::extract::{JsonBody, QueryParams};
use crate::core::pagination::{ListQuery, PaginatedResponse};

// 分页获取分类
pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<PaginatedResponse<Category>>, AppError> {
    let request = query.resolve(&state.pagination)?;
    let page = state.category_service.list(request).await?;
    Ok(Json(page.into()))
}

// 根据 ID 获取分类
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    state
        .category_service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

// 创建分类
pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = state.category_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

// 更新分类
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    state
        .category_service
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

// 删除分类
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.category_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
