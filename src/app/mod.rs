//! 应用层：路由与共享状态

pub mod category;
pub mod product;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use self::category::{handler as category_handler, model::Category, service::CategoryService};
use self::product::{handler as product_handler, model::ProductRepository, service::ProductService};
use crate::config::{Config, PaginationConfig};
use crate::core::{error::AppError, middleware::request_logging_middleware, repository::Repository};
use crate::infrastructure::repository::{SqlCategoryRepository, SqlProductRepository};

// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// 以 SQLite 存储装配两个服务
    pub fn new(db: SqlitePool, pagination: PaginationConfig) -> Self {
        let categories: Arc<dyn Repository<Category>> =
            Arc::new(SqlCategoryRepository::new(db.clone()));
        let products: Arc<dyn ProductRepository> = Arc::new(SqlProductRepository::new(db.clone()));

        Self {
            db,
            category_service: CategoryService::new(categories.clone(), products.clone()),
            product_service: ProductService::new(products, categories),
            pagination,
        }
    }
}

// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.db).await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

// 创建 API 路由
pub fn create_routes() -> Router<AppState> {
    let categories = Router::new()
        .route(
            "/",
            get(category_handler::list_categories).post(category_handler::create_category),
        )
        .route(
            "/:id",
            get(category_handler::get_category)
                .put(category_handler::update_category)
                .delete(category_handler::delete_category),
        );

    let products = Router::new()
        .route(
            "/",
            get(product_handler::list_products).post(product_handler::create_product),
        )
        .route(
            "/:id",
            get(product_handler::get_product)
                .put(product_handler::update_product)
                .delete(product_handler::delete_product),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/categories", categories)
        .nest("/api/products", products)
}

/// 完整应用：路由 + 中间件 + 状态
pub fn build_app(state: AppState, config: &Config) -> Router {
    create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(Duration::from_secs(config.http.timeout_seconds)))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
