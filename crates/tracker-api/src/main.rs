//! # tracker-api — Binary Entry Point
//!
//! Reads configuration from the environment, picks a credential store, and
//! serves the API. Binds to `PORT` (default 8080).

use std::sync::Arc;

use tracker_api::db::{self, PgCredentialStore};
use tracker_api::state::{AppConfig, AppState, LogFormat};
use tracker_auth::{CredentialStore, InMemoryCredentialStore};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Configuration error: {e}");
            return Err(e.into());
        }
    };
    init_tracing(config.log_format);

    let pool = db::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let store: Arc<dyn CredentialStore> = match pool {
        Some(pool) => Arc::new(PgCredentialStore::new(pool)),
        None => Arc::new(InMemoryCredentialStore::new()),
    };

    let state = AppState::new(config, store).map_err(|e| {
        tracing::error!("Password scheme initialization failed: {e}");
        e
    })?;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = tracker_api::app(state);

    tracing::info!("Tracker API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
