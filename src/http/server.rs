//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared outbound client and the resolver once
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, outer timeout)
//! - Serve on a caller-supplied listener until shutdown

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, AdServerConfig};
use crate::http::ad::serve_ad;
use crate::http::request::MakeRequestUuid;
use crate::lifecycle::StartupError;
use crate::upstream::UpstreamResolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: UpstreamResolver,
    pub metrics: Option<PrometheusHandle>,
}

/// HTTP server for the ad lookup service.
pub struct HttpServer {
    config: AdServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AdServerConfig) -> Result<Self, StartupError> {
        let base_url = validate_config(&config)?;
        let client = reqwest::Client::builder().build()?;
        let resolver = UpstreamResolver::new(client, &base_url);

        Ok(Self::with_resolver(config, resolver))
    }

    /// Create a server around an already built resolver.
    pub fn with_resolver(config: AdServerConfig, resolver: UpstreamResolver) -> Self {
        Self {
            config,
            state: AppState {
                resolver,
                metrics: None,
            },
        }
    }

    /// Expose `handle` on `GET /metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.state.metrics = Some(handle);
        self
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/ad", get(serve_ad))
            .route("/metrics", get(serve_metrics))
            .with_state(self.state.clone())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            recommender_url = %self.config.upstream.recommender_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AdServerConfig {
        &self.config
    }
}

async fn serve_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
