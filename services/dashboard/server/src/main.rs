use std::sync::Arc;

use anyhow::Context;
use dashboard_api::store::PgStore;
use dashboard_api::{AppState, Config, routes};
use openaq_client::OpenAqClient;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

fn main() {
    let config = Config::load().expect("Failed to load config");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
        .block_on(async {
            if let Err(e) = setup(config).await {
                tracing::error!("Fatal error during setup: {e:#}");
                std::process::exit(1);
            }
        });
}

async fn setup(config: Config) -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize tracing filter")?;

    if config.log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_target(true)
            .with_level(true)
            .json();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(true)
            .pretty();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    };

    let addr = format!("0.0.0.0:{}", config.api_service_port);
    tracing::info!("Starting dashboard-api service at: {addr}");

    let pool = postgres_models::connection::establish_connection(
        config.database_url.clone(),
    )
    .await
    .context("Failed to connect to Postgres")?;

    // Schema is managed programmatically, no migrations
    let mut conn = pool
        .get_owned()
        .await
        .context("Failed to get connection for schema setup")?;
    postgres_models::ddl::create_all(&mut conn)
        .await
        .context("Failed to create dashboard tables")?;
    drop(conn);

    let client =
        Arc::new(OpenAqClient::with_base_url(&config.openaq_base_url));
    tracing::info!(base_url = %client.base_url(), "Initialized OpenAQ client");

    let app_state = AppState {
        store: Arc::new(PgStore::new(pool)),
        client,
        config: Arc::new(config),
    };
    let app = routes::app(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("Server exited with error")?;

    Ok(())
}
