//! Origin/destination token validation.
//!
//! # Data Flow
//! ```text
//! raw token
//!     → classifier.rs: character check    (fail: InvalidCharacters)
//!     → classifier.rs: shape              (code vs region, no lookup)
//!     → classifier.rs: existence          (fail: LocationNotFound / RegionNotFound)
//!     → pipeline.rs: resolution           (code → [code], region → codes of its descendants)
//! ```
//!
//! Origin runs all four steps before destination starts.

pub mod classifier;
pub mod pipeline;

pub use classifier::{
    has_safe_characters, validate_token, Side, TokenError, TokenKind, ValidatedToken,
};
pub use pipeline::{resolve_codes, validate_endpoints, PipelineError, ResolvedEndpoints};
