//! Recommender lookup subsystem.
//!
//! # Data Flow
//! ```text
//! identifier + deadline
//!     → resolver.rs (GET {base}/find?id=..., bounded by the deadline)
//!     → status check → body read → JSON decode → empty check
//!     → Resolution { value, error }
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound attempt per lookup; no retries, no caching
//! - Every failure maps to the fallback value; the error is reported
//!   alongside it for logging
//! - The deadline covers the whole exchange, body included

use std::time::Duration;

pub mod resolver;
pub mod types;

pub use resolver::UpstreamResolver;
pub use types::{Resolution, ResolveError, ResolvedValue, UpstreamAnswer, FALLBACK};

/// Fixed budget for one recommender call, independent of the inbound
/// request timeout.
pub const RESOLVE_DEADLINE: Duration = Duration::from_millis(2000);
