mod api;
mod config;
mod error;
mod main_lib;

use std::sync::Arc;

use affiliate_roi_core::projections::ProjectionService;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};
use crate::main_lib::{build_app, AppState};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let assumptions = config.load_assumptions()?;
    let projection_service = ProjectionService::new(assumptions)?;

    let state = Arc::new(AppState {
        projection_service: Arc::new(projection_service),
        simulated_delay: config.simulated_delay,
    });
    let app = build_app(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Projection server listening on {}", config.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
    tracing::info!("Shutting down");
}
