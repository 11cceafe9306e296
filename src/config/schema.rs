//! Configuration schema definitions.
//!
//! Every field has a default so the service starts with an empty
//! environment.

/// Root configuration for the ad server.
#[derive(Debug, Clone, Default)]
pub struct AdServerConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Recommender service settings.
    pub upstream: UpstreamConfig,

    /// Outer request timeout.
    pub timeouts: TimeoutConfig,
}

impl AdServerConfig {
    /// Default configuration pointing at the given recommender.
    pub fn with_recommender_url(url: impl Into<String>) -> Self {
        Self {
            upstream: UpstreamConfig {
                recommender_url: url.into(),
            },
            ..Self::default()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address. Fixed; not read from the environment.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Recommender service configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the recommender, e.g. `http://localhost:8085`.
    pub recommender_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            recommender_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Timeout for a whole inbound request.
///
/// The per-lookup deadline is separate and lives in
/// [`crate::upstream::RESOLVE_DEADLINE`].
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
