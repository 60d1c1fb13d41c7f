//! Application Layer
//!
//! The submit sequencer, the screen controller and their configuration.

pub mod app_controller;
pub mod auth_gate;
pub mod config;

// Re-exports
pub use app_controller::{AppController, Screen};
pub use auth_gate::{AuthGate, GateSignal, GateState};
pub use config::GateConfig;
