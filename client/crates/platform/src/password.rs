//! Password Policy and Secret Handling
//!
//! Client-side password rules with:
//! - Minimum length counted in Unicode code points
//! - Required character classes (digit, lowercase, uppercase, symbol)
//! - Optional restriction to the allowed character set
//! - Zeroization of clear text secrets
//!
//! The policy only reports violations; turning them into user-facing text
//! is the job of the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols accepted by the symbol class
pub const PASSWORD_SYMBOLS: &[char] = &['$', '@', '#', '!', '%', '*', '?', '&'];

// ============================================================================
// Character classes
// ============================================================================

/// Character class a password may be required to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// ASCII digit `0-9`
    Digit,
    /// ASCII lowercase letter `a-z`
    Lowercase,
    /// ASCII uppercase letter `A-Z`
    Uppercase,
    /// One of [`PASSWORD_SYMBOLS`]
    Symbol,
}

impl CharClass {
    /// All classes in reporting order
    pub const ALL: [CharClass; 4] = [
        CharClass::Digit,
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Symbol,
    ];

    /// Check if a character belongs to this class (case-sensitive)
    #[inline]
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Lowercase => c.is_ascii_lowercase(),
            CharClass::Uppercase => c.is_ascii_uppercase(),
            CharClass::Symbol => PASSWORD_SYMBOLS.contains(&c),
        }
    }

    /// Get string code for logs and serialization
    #[inline]
    pub const fn code(self) -> &'static str {
        match self {
            CharClass::Digit => "digit",
            CharClass::Lowercase => "lowercase",
            CharClass::Uppercase => "uppercase",
            CharClass::Symbol => "symbol",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password lacks a required character class
    #[error("Password must contain at least one {0} character")]
    MissingClass(CharClass),

    /// Password contains a character outside the allowed set
    #[error("Password contains characters that are not allowed")]
    DisallowedCharacter,
}

// ============================================================================
// Password Policy
// ============================================================================

/// Immutable password policy
///
/// ## Examples
/// ```rust
/// use platform::password::PasswordPolicy;
///
/// let policy = PasswordPolicy::default();
/// assert!(policy.check("Abc123!@").is_empty());
/// assert_eq!(policy.check("abc123").len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    min_length: usize,
    required_classes: Vec<CharClass>,
    restrict_charset: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            required_classes: CharClass::ALL.to_vec(),
            restrict_charset: true,
        }
    }
}

impl PasswordPolicy {
    /// Create a policy with explicit settings
    ///
    /// Required classes are deduplicated and kept in [`CharClass::ALL`] order
    /// so that violation reports stay deterministic.
    pub fn new(min_length: usize, required_classes: &[CharClass], restrict_charset: bool) -> Self {
        let required_classes = CharClass::ALL
            .into_iter()
            .filter(|class| required_classes.contains(class))
            .collect();

        Self {
            min_length,
            required_classes,
            restrict_charset,
        }
    }

    /// Same policy with a different minimum length
    pub fn with_min_length(self, min_length: usize) -> Self {
        Self { min_length, ..self }
    }

    /// Same policy with the character set restriction toggled
    pub fn with_restricted_charset(self, restrict_charset: bool) -> Self {
        Self {
            restrict_charset,
            ..self
        }
    }

    #[inline]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    #[inline]
    pub fn required_classes(&self) -> &[CharClass] {
        &self.required_classes
    }

    #[inline]
    pub fn restricts_charset(&self) -> bool {
        self.restrict_charset
    }

    /// Check if a character is in the allowed set
    #[inline]
    pub fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(&c)
    }

    /// Check a password against the policy
    ///
    /// Returns every violation in a fixed order: length, missing classes
    /// (in [`CharClass::ALL`] order), disallowed characters.
    /// An empty vector means the password satisfies the policy.
    pub fn check(&self, password: &str) -> Vec<PasswordPolicyError> {
        let mut violations = Vec::new();

        let actual = password.chars().count();
        if actual < self.min_length {
            violations.push(PasswordPolicyError::TooShort {
                min: self.min_length,
                actual,
            });
        }

        for &class in &self.required_classes {
            if !password.chars().any(|c| class.matches(c)) {
                violations.push(PasswordPolicyError::MissingClass(class));
            }
        }

        if self.restrict_charset && !password.chars().all(Self::is_allowed_char) {
            violations.push(PasswordPolicyError::DisallowedCharacter);
        }

        violations
    }
}

// ============================================================================
// Clear Text (Zeroized on drop)
// ============================================================================

/// Clear text secret with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Debug output is redacted
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ClearText(String);

impl ClearText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the secret. Never log the returned value.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ClearText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClearText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for ClearText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearText").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
