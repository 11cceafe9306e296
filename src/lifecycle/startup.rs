//! Startup orchestration.
//!
//! Config, recorder and server are built in order; the port is bound
//! only once all of them succeeded.

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{self, ConfigError};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::{self, Shutdown};
use crate::observability::metrics;

/// Errors that terminate the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Load configuration from the environment and serve until shutdown.
pub async fn run() -> Result<(), StartupError> {
    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        recommender_url = %config.upstream.recommender_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let recorder = metrics::install()?;
    let server = HttpServer::new(config.clone())?.with_metrics(recorder);

    let address = config.listener.bind_address;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    tracing::info!("Starting up on {}", local_addr.port());

    let shutdown = Shutdown::new();
    let stop = shutdown.signalled();
    tokio::spawn(async move {
        shutdown::ctrl_c().await;
        shutdown.trigger();
    });

    server.run(listener, stop).await.map_err(StartupError::Serve)
}
