//! Console configuration
//!
//! Read from the process environment (after `.env` is loaded).
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SPLASH_MS` | `2000` | Splash screen duration |
//! | `PASSWORD_MIN_LENGTH` | `8` | Minimum password length on registration |
//! | `PASSWORD_RESTRICT_CHARSET` | `true` | Reject characters outside letters, digits and `$@#!%*?&` |
//! | `PROVIDER_LATENCY_MS` | `0` | Simulated identity provider latency |
//! | `OUTPUT_JSON` | `false` | Print reports as JSON lines |

use std::env;
use std::time::Duration;

use auth::GateConfig;
use kernel::error::app_error::{AppError, AppResult, ResultExt};
use kernel::error::kind::ErrorKind;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub gate: GateConfig,
    pub provider_latency: Duration,
    pub json_output: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            provider_latency: Duration::ZERO,
            json_output: false,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("SPLASH_MS") {
            config.gate.splash_duration = Duration::from_millis(parse_u64("SPLASH_MS", &raw)?);
        }

        if let Some(raw) = lookup("PASSWORD_MIN_LENGTH") {
            let min_length = parse_u64("PASSWORD_MIN_LENGTH", &raw)? as usize;
            if min_length == 0 {
                return Err(AppError::validation("PASSWORD_MIN_LENGTH must be at least 1")
                    .with_action("Unset it to use the default of 8"));
            }
            config.gate.password_policy = config.gate.password_policy.with_min_length(min_length);
        }

        if let Some(raw) = lookup("PASSWORD_RESTRICT_CHARSET") {
            let restrict = parse_bool("PASSWORD_RESTRICT_CHARSET", &raw)?;
            config.gate.password_policy =
                config.gate.password_policy.with_restricted_charset(restrict);
        }

        if let Some(raw) = lookup("PROVIDER_LATENCY_MS") {
            config.provider_latency =
                Duration::from_millis(parse_u64("PROVIDER_LATENCY_MS", &raw)?);
        }

        if let Some(raw) = lookup("OUTPUT_JSON") {
            config.json_output = parse_bool("OUTPUT_JSON", &raw)?;
        }

        Ok(config)
    }
}

fn parse_u64(key: &'static str, raw: &str) -> AppResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_app_err(ErrorKind::Validation, format!("{key} must be a whole number"))
}

fn parse_bool(key: &'static str, raw: &str) -> AppResult<bool> {
    raw.trim()
        .to_ascii_lowercase()
        .parse::<bool>()
        .map_app_err(ErrorKind::Validation, format!("{key} must be true or false"))
}
