//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! client crates:
//! - Common error types and result aliases
//! - Error classification used by the UI layer to pick a presentation
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all screens.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
