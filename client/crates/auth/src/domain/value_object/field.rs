//! Form Field Identifier

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Input field of the login or registration form
///
/// Display renders the stable field name used as the error key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[display("username")]
    Username,
    #[display("password")]
    Password,
    #[display("confirm_password")]
    ConfirmPassword,
}

impl Field {
    /// Human-readable label shown next to the input
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }

    /// Message reported when the field is left blank
    pub fn required_message(&self) -> String {
        format!("{} is required", self.label())
    }
}
