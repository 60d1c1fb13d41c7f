//! Authentication Outcome
//!
//! Result reported by the identity provider for one sign-in or
//! account-creation call. Consumed exactly once by the gate.

/// Identity provider outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The provider accepted the credentials
    Success,
    /// The provider refused; the reason is shown to the user verbatim
    Failure(String),
}

impl AuthOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure(reason.into())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
