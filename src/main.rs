//! Ad lookup service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌─────────────────────────────────────┐
//!   GET /ad?id=42 ───▶│ http::ad ──(id)──▶ UpstreamResolver │───▶ GET /find?id=42 (recommender)
//!                     │                                     │
//!   200 shoe-ad-7 ◀───│ response::line ◀── value | default  │◀─── {"Id","Result"}
//!                     └─────────────────────────────────────┘
//! ```
//!
//! Configuration comes from `ADSERVER_ADRECOMMENDERURL` (default
//! `http://localhost:8080`). The server listens on port 8081.

use ad_server::lifecycle::{startup, StartupError};
use ad_server::observability::logging;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    logging::init();

    tracing::info!("ad-server v{} starting", env!("CARGO_PKG_VERSION"));

    let result = startup::run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Fatal error");
    }
    result
}
