//! Error types for platform operations.

use thiserror::Error;

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error taxonomy for the platform core.
///
/// Every variant is recoverable at the boundary: the web layer maps each to
/// a structured HTTP response and nothing here crashes the process.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlatformError {
    // ═══════════════════════════════════════════════════════════
    // Client Errors
    // ═══════════════════════════════════════════════════════════

    /// Input missing or out of range.
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Field the input failed on.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Referenced entity does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// The kind of entity that was missing.
        resource: &'static str,
    },

    /// Authenticated, but not allowed to perform the operation.
    #[error("{0}")]
    Forbidden(String),

    /// Duplicate subscribe or follow.
    #[error("{0}")]
    Conflict(String),

    /// The operation requires identity and none was presented.
    #[error("Authentication required")]
    Unauthenticated,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Storage operation failed. Reported generically at the boundary;
    /// the detail is for logs only.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlatformError {
    /// Shorthand for a [`PlatformError::Validation`] error.
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`PlatformError::NotFound`] error.
    #[must_use]
    pub const fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Returns `true` if this error is the caller's fault rather than the
    /// platform's.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::Forbidden(_)
                | Self::Conflict(_)
                | Self::Unauthenticated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_formats_field_context() {
        let err = PlatformError::validation("price", "must be non-negative");
        assert_eq!(err.to_string(), "Invalid price: must be non-negative");
        assert!(err.is_client_error());
    }

    #[test]
    fn storage_errors_are_not_client_errors() {
        assert!(!PlatformError::Storage("pool exhausted".to_string()).is_client_error());
    }
}
