//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build client + server → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C (or test trigger) → stop accepting → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound last, after everything else is built

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::StartupError;
