//! Infrastructure Layer
//!
//! Identity provider implementations.

pub mod memory;
