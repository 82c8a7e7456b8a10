//! Error types for FanHub.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Cache lookups never produce these errors themselves; they come from
//! content producers, the user store and configuration.

use thiserror::Error;

/// Result type alias using `FanhubError`.
pub type Result<T> = std::result::Result<T, FanhubError>;

/// Main error type for all FanHub operations.
#[derive(Debug, Error)]
pub enum FanhubError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONTENT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The content source could not produce a value.
    #[error("Content provider unavailable for '{resource}': {reason}")]
    ProviderUnavailable {
        /// Resource that was requested, e.g. `news`
        resource: String,
        /// What the provider reported
        reason: String,
    },

    /// Unknown esport name.
    #[error("Unknown esport: {0}")]
    UnknownEsport(String),

    /// Unknown social platform name.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // AUTH ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Email is already registered.
    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    /// No user with that email.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Password does not match the stored one.
    #[error("Invalid password")]
    InvalidPassword,

    /// Operation requires a logged-in user.
    #[error("Not authenticated")]
    NotAuthenticated,

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl FanhubError {
    /// Builds a `ProviderUnavailable` error for a resource.
    pub fn unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        FanhubError::ProviderUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FanhubError::ProviderUnavailable { .. })
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            FanhubError::EmailAlreadyRegistered(_)
                | FanhubError::UserNotFound(_)
                | FanhubError::InvalidPassword
                | FanhubError::NotAuthenticated
        )
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            FanhubError::ValidationError(_)
                | FanhubError::UnknownEsport(_)
                | FanhubError::UnknownPlatform(_)
        )
    }
}
