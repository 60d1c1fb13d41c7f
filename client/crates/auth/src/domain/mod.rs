//! Domain Layer
//!
//! Contains value objects, the session entity, the form validator and
//! the identity provider trait.

pub mod entity;
pub mod form_validator;
pub mod identity;
pub mod value_object;

// Re-exports
pub use entity::session::Session;
pub use form_validator::FormValidator;
pub use identity::{IdentityProvider, LocalIdentityProvider};
