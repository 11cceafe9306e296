//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id)
//!     → ad.rs (extract id, short-circuit or call the resolver)
//!     → response.rs (200, single line body)
//!     → Send to client
//! ```

pub mod ad;
pub mod request;
pub mod response;
pub mod server;

pub use ad::LookupRequest;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
