use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use filing_ingest::infrastructure::observability::{TracingConfig, init_tracing};
use filing_ingest::infrastructure::text_processing::ExtractionEngines;
use filing_ingest::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json || environment.prefers_json_logs(),
        &settings.logging.level,
    ));

    let engines =
        ExtractionEngines::from_settings(&settings).context("failed to build extraction engines")?;
    tracing::info!(
        mode = %engines.mode,
        vision = engines.router.has_vision(),
        "Extraction engines ready"
    );

    let router = create_router(AppState::from_settings(engines, &settings));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
