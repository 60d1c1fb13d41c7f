//! Auth (Credential Gate) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, session entity, form validator, provider trait
//! - `application/` - Auth gate, screen controller, configuration
//! - `infra/` - Identity provider implementations
//!
//! ## Features
//! - Presence, password-policy and confirmation checks on form input
//! - At most one in-flight sign-in or sign-up per form
//! - Explicit session object instead of global state
//! - Screen state machine driven by gate signals
//!
//! ## Security Model
//! - Authentication is decided by the external identity provider only
//! - Passwords are zeroized on drop and redacted from `Debug` output
//! - Passwords are never logged
//! - Results arriving after a logout are discarded

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{AppController, AuthGate, GateConfig, GateSignal, GateState, Screen};
pub use domain::{FormValidator, IdentityProvider, LocalIdentityProvider, Session};
pub use error::AuthError;
pub use infra::memory::InMemoryIdentityProvider;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::value_object::auth_outcome::AuthOutcome;
    pub use crate::domain::value_object::field::Field;
    pub use crate::domain::value_object::form_fields::FormFields;
    pub use crate::domain::value_object::validation_result::{FieldError, ValidationResult};
}

#[cfg(test)]
mod tests;
