//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional) + process environment
//!     → loader.rs (read ADSERVER_* variables, apply defaults)
//!     → validation.rs (recommender URL must be absolute http/https)
//!     → AdServerConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Only the recommender URL comes from the environment; everything else
//!   is a compiled-in default
//! - Config is immutable once loaded; there is no reload
//! - Any configuration error is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_with, ConfigError, RECOMMENDER_URL_VAR};
pub use schema::{AdServerConfig, ListenerConfig, TimeoutConfig, UpstreamConfig};
pub use validation::validate_config;
