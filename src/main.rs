use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purchase_ledger::infrastructure::AppState;
use purchase_ledger::{config, db, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env first so RUST_LOG from it reaches the subscriber
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let db = db::connect(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        e
    })?;

    // A failed sync is logged; the server still starts
    match db::sync_schema(&db).await {
        Ok(()) => tracing::info!("Database & tables synced"),
        Err(e) => tracing::error!("Error syncing DB: {}", e),
    }

    let state = AppState::new(db.clone());
    let app = server::build_router(state, &config.cors_allowed_origins);

    server::serve(app, config.port).await?;

    db.close().await?;
    tracing::info!("Database connection closed");

    Ok(())
}
