//! Text and JSON rendering of what the user should see

use std::fmt::Write as _;

use auth::{AppError, GateSignal, GateState, Screen};
use kernel::error::app_error::AppResult;
use serde_json::{Value, json};

/// Snapshot printed after every command
#[derive(Debug, Clone)]
pub struct Report {
    pub screen: Screen,
    pub user_name: Option<String>,
    pub signal: Option<GateSignal>,
    /// State of the form the command acted on
    pub form: Option<GateState>,
}

impl Report {
    pub fn render(&self, json_output: bool) -> AppResult<String> {
        if json_output {
            Ok(serde_json::to_string(&self.to_json())?)
        } else {
            Ok(self.to_text())
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("[{}]", self.screen);
        if let Some(user) = &self.user_name {
            let _ = write!(out, " signed in as {user}");
        }
        if let Some(signal) = self.signal {
            let _ = write!(out, " ({signal})");
        }

        if let Some(err) = self.form.as_ref().and_then(GateState::error) {
            match err.validation() {
                Some(result) => {
                    for error in result.field_errors() {
                        let _ = write!(out, "\n  {}: {}", error.field, error.message);
                    }
                }
                // Provider reasons are shown as given, without a kind label
                None => {
                    let app = err.to_app_error();
                    let _ = write!(out, "\n  {}", app.message());
                    if let Some(action) = app.action() {
                        let _ = write!(out, " ({action})");
                    }
                }
            }
        }

        out
    }

    pub fn to_json(&self) -> Value {
        let error = self.form.as_ref().and_then(GateState::error);
        json!({
            "screen": self.screen.code(),
            "user_name": self.user_name,
            "signal": self.signal.map(|s| s.code()),
            "state": self.form.as_ref().map(GateState::code),
            "kind": error.map(|e| e.kind()),
            "validation": error.and_then(|e| e.validation()),
            "error": error.and_then(|e| e.reason()),
        })
    }
}

pub fn render_error(err: &AppError, json_output: bool) -> String {
    if json_output {
        json!({
            "error": err.message(),
            "kind": err.kind(),
            "action": err.action(),
        })
        .to_string()
    } else {
        format!("  {err}")
    }
}
