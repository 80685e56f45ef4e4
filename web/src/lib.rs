//! # Stride Web
//!
//! Axum HTTP surface for the Stride platform.
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Extract** the bearer credential (`Bearer`, infallible)
//! 3. **Resolve** it to a `Viewer` once via the identity resolver
//! 4. **Call** the core service with the viewer threaded through
//! 5. **Map** the result to JSON, or the `PlatformError` to an `AppError`
//!
//! Response shaping never happens here: plan projections come out of the
//! core entitlement engine already redacted for the viewer.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::Bearer;
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::platform_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
