//! HP dev server: serves the built client and proxies `/api` to the backend.

mod config;
mod proxy;
mod routes;
mod state;
#[cfg(test)]
mod test_helpers;

use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let config = Config::from_env().inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;
    let addr = config.bind_addr();
    tracing::info!(
        upstream = %config.api_origin,
        dist = %config.dist_dir.display(),
        proxy_ws = config.proxy_ws,
        "configuration loaded"
    );

    let state = state::AppState::new(config)?;
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(port = addr.port(), "hp dev server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
