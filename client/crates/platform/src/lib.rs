//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policy (length, character classes, allowed characters)
//! - Secret text that is zeroized on drop and redacted from `Debug`

pub mod password;
