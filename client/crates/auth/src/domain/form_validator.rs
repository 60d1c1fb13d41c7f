//! Form Validator
//!
//! Presence and format rules over in-progress form values.
//! Pure functions of their inputs: every failure is reported in the
//! returned [`ValidationResult`], nothing panics or returns `Err`.

use platform::password::{CharClass, PASSWORD_SYMBOLS, PasswordPolicy, PasswordPolicyError};

use crate::domain::value_object::{
    field::Field, form_fields::FormFields, validation_result::ValidationResult,
};

/// Message reported when password and confirmation differ
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Validator for the login and registration forms
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    policy: PasswordPolicy,
}

impl FormValidator {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    #[inline]
    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// One "required" error for every field that is blank after trimming
    pub fn validate_presence(fields: &[(Field, &str)]) -> ValidationResult {
        let mut result = ValidationResult::valid();
        for &(field, value) in fields {
            if is_blank(value) {
                result.insert(field, field.required_message());
            }
        }
        result
    }

    /// Check the password against this validator's policy
    pub fn validate_password(&self, password: &str) -> ValidationResult {
        Self::validate_password_with(password, &self.policy)
    }

    /// Check the password against an explicit policy
    ///
    /// The message lists every unmet requirement in a fixed order, so the
    /// same input always yields the same text.
    pub fn validate_password_with(password: &str, policy: &PasswordPolicy) -> ValidationResult {
        let violations = policy.check(password);
        if violations.is_empty() {
            return ValidationResult::valid();
        }
        ValidationResult::with_error(Field::Password, password_message(&violations))
    }

    /// Fails iff `password != confirmation`; the error belongs to the confirmation
    pub fn validate_match(password: &str, confirmation: &str) -> ValidationResult {
        if password == confirmation {
            ValidationResult::valid()
        } else {
            ValidationResult::with_error(Field::ConfirmPassword, PASSWORD_MISMATCH_MESSAGE)
        }
    }

    /// Login form: user name and password are required
    pub fn validate_login(&self, fields: &FormFields) -> ValidationResult {
        Self::validate_presence(&[
            (Field::Username, fields.username.as_str()),
            (Field::Password, fields.password()),
        ])
    }

    /// Registration form: presence, password policy and confirmation
    ///
    /// A blank field only reports "required"; the policy and match checks
    /// run for fields that have a value. Errors come back in field order.
    pub fn validate_registration(&self, fields: &FormFields) -> ValidationResult {
        let password = fields.password();
        let confirmation = fields.confirm_password();

        let mut result = Self::validate_presence(&[(Field::Username, fields.username.as_str())]);

        if is_blank(password) {
            result.merge(Self::validate_presence(&[(Field::Password, password)]));
        } else {
            result.merge(self.validate_password(password));
        }

        if is_blank(confirmation) {
            result.merge(Self::validate_presence(&[(Field::ConfirmPassword, confirmation)]));
        } else if !is_blank(password) {
            result.merge(Self::validate_match(password, confirmation));
        }

        result
    }
}

#[inline]
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Build the user-facing password message from policy violations
fn password_message(violations: &[PasswordPolicyError]) -> String {
    let mut requirements = Vec::new();
    let mut missing = Vec::new();

    for violation in violations {
        match violation {
            PasswordPolicyError::TooShort { min, .. } => {
                requirements.push(format!("be at least {min} characters long"));
            }
            PasswordPolicyError::MissingClass(class) => missing.push(class_description(*class)),
            PasswordPolicyError::DisallowedCharacter => {}
        }
    }

    if !missing.is_empty() {
        requirements.push(format!("contain {}", join_and(&missing)));
    }

    if violations.contains(&PasswordPolicyError::DisallowedCharacter) {
        requirements.push(format!(
            "use only letters, numbers and the special characters {}",
            PASSWORD_SYMBOLS.iter().collect::<String>()
        ));
    }

    format!("Password must {}", join_and(&requirements))
}

fn class_description(class: CharClass) -> String {
    match class {
        CharClass::Digit => "a number".to_string(),
        CharClass::Lowercase => "a lowercase letter".to_string(),
        CharClass::Uppercase => "an uppercase letter".to_string(),
        CharClass::Symbol => format!(
            "a special character ({})",
            PASSWORD_SYMBOLS.iter().collect::<String>()
        ),
    }
}

/// "a", "a and b", "a, b and c"
fn join_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
