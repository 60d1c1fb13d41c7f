//! Validation Result Value Object
//!
//! Outcome of a validation call: an ordered mapping from field to message.
//!
//! ## Invariants
//! - `is_valid()` is true iff there are no field errors
//! - Insertion order is display order
//! - At most one message per field (re-inserting replaces in place)

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use super::field::Field;

/// A validation failure attributed to one field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Structured validation result, produced fresh per validation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    field_errors: Vec<FieldError>,
}

impl ValidationResult {
    /// A result without errors
    #[inline]
    pub fn valid() -> Self {
        Self::default()
    }

    /// A result with a single error
    pub fn with_error(field: Field, message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.insert(field, message);
        result
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Number of fields with an error
    #[inline]
    pub fn len(&self) -> usize {
        self.field_errors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Record an error for `field`
    ///
    /// If the field already has an error its message is replaced and it
    /// keeps its original position.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        let message = message.into();
        match self.field_errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => self.field_errors.push(FieldError { field, message }),
        }
    }

    /// Append every error of `other`, in its order
    pub fn merge(&mut self, other: ValidationResult) {
        for FieldError { field, message } in other.field_errors {
            self.insert(field, message);
        }
    }

    /// Message recorded for `field`, if any
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[inline]
    pub fn has_error(&self, field: Field) -> bool {
        self.error_for(field).is_some()
    }

    /// Errors in display order
    #[inline]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Fields with an error, in display order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.field_errors.iter().map(|e| e.field)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("valid");
        }
        for (i, error) in self.field_errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("field_errors", &self.field_errors)?;
        state.end()
    }
}
