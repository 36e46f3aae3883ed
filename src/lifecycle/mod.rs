//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Metrics → Open store → Load regions + codes → Build index → Bind → Serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Trigger or SIGTERM/SIGINT → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: reference data first, listener last
//! - Reference data is never reloaded while running

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_state, open_store, run, StartupError};
