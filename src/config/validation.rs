//! Configuration validation.
//!
//! Serde is not involved here; the only semantic check is that the
//! recommender URL can be used as a base for outbound requests.

use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::AdServerConfig;

/// Validate the configuration, returning the parsed recommender URL.
pub fn validate_config(config: &AdServerConfig) -> Result<Url, ConfigError> {
    let raw = &config.upstream.recommender_url;
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        value: raw.clone(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
