//! Value Object Module

pub mod auth_outcome;
pub mod field;
pub mod form_fields;
pub mod validation_result;
