//! Ad lookup service.
//!
//! Answers `GET /ad?id=<id>` by asking a recommender service for
//! `GET /find?id=<id>` and returning its result, or the token `default`
//! when there is no id or the lookup fails in any way.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::AdServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::UpstreamResolver;
