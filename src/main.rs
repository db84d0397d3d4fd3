use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use zurich_tax_api::config::TaxApiConfig;
use zurich_tax_api::database::sqlite::{self, SqliteRepository};
use zurich_tax_api::logging::init_logging;
use zurich_tax_api::services::TaxRecordService;
use zurich_tax_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();
    init_logging();

    let config = TaxApiConfig::from_env()?;

    // connect to our db, provisioning the table when the file is fresh
    let pool = sqlite::connect(
        &config.database_url,
        config.max_connections,
        config.create_database,
    )
    .await?;
    sqlite::run_migrations(&pool).await?;

    let service = TaxRecordService::new(Box::new(SqliteRepository::new(pool)));
    let app_state = AppState {
        tax_service: Arc::new(service),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
