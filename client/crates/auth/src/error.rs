//! Auth Error Types
//!
//! This module provides the gate's failure taxonomy and its mapping onto
//! the unified `kernel::error::AppError` used for rendering.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::validation_result::ValidationResult;

/// Why a submit was rejected
///
/// Neither variant is fatal: the user can correct the input or retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Local validation failed (missing field, weak password, mismatch)
    #[error("{0}")]
    Validation(ValidationResult),

    /// The identity provider refused; message is the provider's, verbatim
    #[error("{0}")]
    Authentication(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::Validation,
            AuthError::Authentication(_) => ErrorKind::Unauthorized,
        }
    }

    /// Per-field errors, if this is a validation failure
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            AuthError::Validation(result) => Some(result),
            AuthError::Authentication(_) => None,
        }
    }

    /// Field-independent message, if the provider refused
    pub fn reason(&self) -> Option<&str> {
        match self {
            AuthError::Authentication(reason) => Some(reason),
            AuthError::Validation(_) => None,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(_) => AppError::validation(self.to_string())
                .with_action("Please correct the highlighted fields"),
            AuthError::Authentication(reason) => {
                AppError::unauthorized(reason.clone()).with_action("Please try again")
            }
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Authentication(reason) => {
                tracing::warn!(reason = %reason, "Identity provider rejected credentials");
            }
            AuthError::Validation(result) => {
                tracing::debug!(invalid_fields = result.len(), "Form validation failed");
            }
        }
    }
}

impl From<ValidationResult> for AuthError {
    fn from(result: ValidationResult) -> Self {
        AuthError::Validation(result)
    }
}
