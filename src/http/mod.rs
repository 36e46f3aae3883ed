//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span)
//!     → handlers.rs (route dispatch)
//!     → params.rs (defaults, date and length checks)
//!     → tokens (origin, then destination)
//!     → rates (aggregation query)
//!     → error.rs (failures → status + {"detail": ...})
//! ```

pub mod error;
pub mod handlers;
pub mod params;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
