//! In-Memory Identity Provider
//!
//! Stand-in for the hosted identity service: accounts live in a map and
//! every call can be delayed to mimic network latency.

use std::collections::HashMap;
use std::time::Duration;

use platform::password::ClearText;
use tokio::sync::Mutex;

use crate::domain::identity::IdentityProvider;
use crate::domain::value_object::auth_outcome::AuthOutcome;

/// Reason reported for an unknown user or a wrong password
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Reason reported when the user name is taken
pub const ACCOUNT_EXISTS: &str = "An account with this username already exists";

/// Map-backed identity provider
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, ClearText>>,
    latency: Duration,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    /// Seed an account
    pub fn with_account(mut self, identifier: &str, secret: &str) -> Self {
        self.accounts
            .get_mut()
            .insert(identifier.to_string(), ClearText::new(secret));
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, identifier: &str, secret: &str) -> AuthOutcome {
        self.simulate_latency().await;

        let accounts = self.accounts.lock().await;
        match accounts.get(identifier) {
            Some(stored) if stored.expose() == secret => AuthOutcome::Success,
            _ => AuthOutcome::failure(INVALID_CREDENTIALS),
        }
    }

    async fn create_account(&self, identifier: &str, secret: &str) -> AuthOutcome {
        self.simulate_latency().await;

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(identifier) {
            return AuthOutcome::failure(ACCOUNT_EXISTS);
        }
        accounts.insert(identifier.to_string(), ClearText::new(secret));
        tracing::info!(user_name = %identifier, "Account created");
        AuthOutcome::Success
    }
}
