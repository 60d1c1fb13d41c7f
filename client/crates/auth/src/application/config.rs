//! Application Configuration
//!
//! Configuration for the gate and the screen controller.

use std::time::Duration;

/// Re-export PasswordPolicy from platform
pub use platform::password::PasswordPolicy;

/// Gate application configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Password rules applied on registration
    pub password_policy: PasswordPolicy,
    /// How long the splash screen stays up (2 seconds)
    pub splash_duration: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            password_policy: PasswordPolicy::default(),
            splash_duration: Duration::from_secs(2),
        }
    }
}

impl GateConfig {
    /// Create config for development (no splash delay)
    pub fn development() -> Self {
        Self {
            splash_duration: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Get splash duration in milliseconds
    pub fn splash_duration_ms(&self) -> u64 {
        self.splash_duration.as_millis() as u64
    }
}
