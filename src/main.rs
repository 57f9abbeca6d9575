use catalog_api::{
    build_app,
    config::{self, Config},
    infrastructure::{database::DatabaseManager, logger::Logger, seed::seed_data},
    AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_file = config::find_config_file();
    let config = config::load_config(config_file)?;
    Logger::init(&config.logging);

    info!("Starting catalog server...");
    match config_file {
        Some(path) => info!("Loaded configuration from {}", path),
        None => info!("No config file found, using defaults"),
    }

    let database = DatabaseManager::new(&config.database).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        e
    })?;

    if config.seed.enabled {
        seed_data(database.get_pool()).await?;
    }

    let state = AppState::new(database.get_pool().clone(), config.pagination.clone());
    let app = build_app(state, &config);

    let listener = TcpListener::bind(config.listen_address()).await?;
    let addr = listener.local_addr()?;

    print_endpoints(&config, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn print_endpoints(config: &Config, addr: std::net::SocketAddr) {
    info!("🚀 Catalog server running on http://{}", addr);
    info!("📖 API endpoints:");
    info!("   GET    /health                 - Health check");
    info!(
        "   GET    /api/categories         - List categories (?page=0&size={})",
        config.pagination.default_size
    );
    info!("   POST   /api/categories         - Create category");
    info!("   GET    /api/categories/:id     - Get category");
    info!("   PUT    /api/categories/:id     - Replace category");
    info!("   DELETE /api/categories/:id     - Delete category");
    info!("   GET    /api/products           - List products");
    info!("   POST   /api/products           - Create product");
    info!("   GET    /api/products/:id       - Get product");
    info!("   PUT    /api/products/:id       - Replace product");
    info!("   DELETE /api/products/:id       - Delete product");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
