//! HTTP handlers for the platform surface.
//!
//! Every handler follows the same shape: extract the bearer credential,
//! resolve it to a viewer exactly once, call the relevant core service with
//! the viewer threaded through, and map the result (or error) onto the
//! wire.

pub mod feed;
pub mod health;
pub mod plans;
pub mod subscriptions;
pub mod trainers;

use serde::{Deserialize, Serialize};

/// Plain confirmation body for mutations without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Build a confirmation body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
