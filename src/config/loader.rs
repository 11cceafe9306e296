//! Configuration loading from the environment.

use thiserror::Error;

use crate::config::schema::AdServerConfig;
use crate::config::validation::validate_config;

/// Environment variable holding the recommender base URL.
pub const RECOMMENDER_URL_VAR: &str = "ADSERVER_ADRECOMMENDERURL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The recommender URL does not parse.
    #[error("invalid recommender URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The recommender URL is not http or https.
    #[error("unsupported recommender URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// Load and validate configuration from the process environment.
///
/// A `.env` file in the working directory is read first if one exists.
pub fn load_from_env() -> Result<AdServerConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }
    load_with(|key| std::env::var(key).ok())
}

/// Load and validate configuration using `lookup` to read variables.
pub fn load_with<F>(lookup: F) -> Result<AdServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AdServerConfig::default();
    if let Some(url) = lookup(RECOMMENDER_URL_VAR) {
        config.upstream.recommender_url = url;
    }

    validate_config(&config)?;

    Ok(config)
}
