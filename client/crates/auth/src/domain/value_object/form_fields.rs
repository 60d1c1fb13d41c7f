//! Form Fields Value Object
//!
//! In-progress values of the login and registration forms.
//! Owned by the UI layer and passed by value into validation and submit.
//! Secrets are wrapped in [`ClearText`] so they are zeroized on drop and
//! never show up in `Debug` output.

use platform::password::ClearText;

/// Field values collected by a form
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    /// User name as typed
    pub username: String,
    /// Password as typed
    pub password: ClearText,
    /// Confirmation, present only on the registration form
    pub confirm_password: Option<ClearText>,
}

impl FormFields {
    /// Fields of the login form
    pub fn login(username: impl Into<String>, password: impl Into<ClearText>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: None,
        }
    }

    /// Fields of the registration form
    pub fn registration(
        username: impl Into<String>,
        password: impl Into<ClearText>,
        confirm_password: impl Into<ClearText>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: Some(confirm_password.into()),
        }
    }

    /// User name with surrounding whitespace removed, as sent to the provider
    #[inline]
    pub fn identifier(&self) -> &str {
        self.username.trim()
    }

    #[inline]
    pub fn password(&self) -> &str {
        self.password.expose()
    }

    /// Confirmation value, empty when the form has no confirmation field
    #[inline]
    pub fn confirm_password(&self) -> &str {
        self.confirm_password
            .as_ref()
            .map(ClearText::expose)
            .unwrap_or_default()
    }
}
