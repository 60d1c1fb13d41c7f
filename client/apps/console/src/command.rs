//! Console commands
//!
//! One command per input line. Missing credentials are passed on as empty
//! strings so the form validator reports them like an empty text field.

use auth::models::FormFields;
use kernel::error::app_error::{AppError, AppResult};

pub const HELP: &str = "\
Commands:
  login <user> <password>
  register <user> <password> <confirm>
  signup      open the registration form
  back        return to the login form
  logout
  status
  help
  quit";

#[derive(Debug)]
pub enum Command {
    Login(FormFields),
    Register(FormFields),
    SignUp,
    Back,
    Logout,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let mut arg = || words.next().unwrap_or_default();

        let command = match name.to_ascii_lowercase().as_str() {
            "login" => {
                let (user, password) = (arg(), arg());
                Command::Login(FormFields::login(user, password))
            }
            "register" => {
                let (user, password, confirm) = (arg(), arg(), arg());
                Command::Register(FormFields::registration(user, password, confirm))
            }
            "signup" => Command::SignUp,
            "back" => Command::Back,
            "logout" => Command::Logout,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(AppError::validation(format!("Unknown command: {other}"))
                    .with_action("Type `help` for the list of commands"));
            }
        };

        Ok(Some(command))
    }
}
