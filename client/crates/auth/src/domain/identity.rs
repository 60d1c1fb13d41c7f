//! Identity Provider Trait
//!
//! The external service that decides whether credentials are valid.
//! The gate treats it as an opaque capability; implementations live in
//! the infrastructure layer (or in the embedding application).

use crate::domain::value_object::auth_outcome::AuthOutcome;

/// Identity provider trait
///
/// Each call resolves to exactly one [`AuthOutcome`]. Timeouts and retries
/// are the provider's business.
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Sign in with an existing account
    async fn sign_in(&self, identifier: &str, secret: &str) -> AuthOutcome;

    /// Create an account and sign in with it
    async fn create_account(&self, identifier: &str, secret: &str) -> AuthOutcome;
}
