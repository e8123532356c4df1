use agri_ledger::{
    api,
    config::{self, AppConfig, database},
    core::seed,
    errors::Result,
};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file first so it can feed both the filter and the config
    let dotenv_loaded = dotenv().is_ok();

    // 2. Load the main application configuration
    let app_config = config::load_app_config()?;

    // 3. Initialize tracing. RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.server.log_level)),
        )
        .init();
    info!(dotenv_loaded, "Configuration loaded");

    // 4. Initialize database and seed empty tables
    let db = prepare_database(&app_config).await?;

    // 5. Serve until interrupted
    let addr = app_config.server.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", addr, e))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, api::create_app(db))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[instrument(skip_all)]
async fn prepare_database(app_config: &AppConfig) -> Result<sea_orm::DatabaseConnection> {
    let db = database::create_connection(&app_config.server.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    let report = seed::seed_if_empty(&db, &app_config.seed)
        .await
        .inspect_err(|e| error!("Failed to seed initial data: {}", e))?;
    info!(
        products = report.products,
        schedules = report.schedules,
        price_snapshots = report.price_snapshots,
        "Seed check complete"
    );
    Ok(db)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
