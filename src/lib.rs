pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod error;
pub mod forms;
pub mod models;
pub mod registry;
pub mod scheduling;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::{Config, ConfigError};
use crate::core_state::{CoreError, CoreState};

/// Errors that stop the service before or while it is serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to open records database: {0}")]
    Store(#[from] CoreError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

/// Initialize tracing, open the store and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = Config::from_env()?;
    tracing::info!(
        database = %config.database_path.display(),
        bind = %config.bind_addr,
        "Configuration loaded"
    );

    let core = Arc::new(CoreState::open(&config.database_path)?);
    let server = api::start_server(core, config.bind_addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    server.shutdown().await;
    Ok(())
}
