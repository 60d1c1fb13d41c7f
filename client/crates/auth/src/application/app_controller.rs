//! App Controller
//!
//! Owns the session, one gate per form and the current [`Screen`].
//! Screen changes are driven by gate signals; nothing else writes them.
//!
//! ```text
//! Splash ──(timer)──> Login <──> Registration
//!                       │            │
//!                       └──(auth)──> Main ──(logout)──> Login
//! ```

use std::fmt;
use std::sync::Arc;

use kernel::error::app_error::{AppError, AppResult};
use tokio::sync::watch;

use crate::application::auth_gate::{AuthGate, GateSignal};
use crate::application::config::GateConfig;
use crate::domain::entity::session::Session;
use crate::domain::form_validator::FormValidator;
use crate::domain::identity::IdentityProvider;
use crate::domain::value_object::form_fields::FormFields;

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Splash,
    Login,
    Registration,
    Main,
}

impl Screen {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Login => "login",
            Self::Registration => "registration",
            Self::Main => "main",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Top-level controller of the client
pub struct AppController<P>
where
    P: IdentityProvider,
{
    config: Arc<GateConfig>,
    session: Arc<Session>,
    login: AuthGate<P>,
    registration: AuthGate<P>,
    screen: watch::Sender<Screen>,
}

impl<P> AppController<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, config: Arc<GateConfig>) -> Self {
        let session = Arc::new(Session::new());
        let validator = FormValidator::new(config.password_policy.clone());

        Self {
            login: AuthGate::new(provider.clone(), session.clone(), validator.clone()),
            registration: AuthGate::new(provider, session.clone(), validator),
            config,
            session,
            screen: watch::Sender::new(Screen::Splash),
        }
    }

    /// Show the splash for the configured duration, then the login form
    pub async fn start(&self) {
        if !self.config.splash_duration.is_zero() {
            tokio::time::sleep(self.config.splash_duration).await;
        }
        self.transition(Screen::Splash, Screen::Login);
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        *self.screen.borrow()
    }

    pub fn subscribe_screen(&self) -> watch::Receiver<Screen> {
        self.screen.subscribe()
    }

    #[inline]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[inline]
    pub fn login_gate(&self) -> &AuthGate<P> {
        &self.login
    }

    #[inline]
    pub fn registration_gate(&self) -> &AuthGate<P> {
        &self.registration
    }

    #[inline]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Login → Registration
    pub fn open_registration(&self) -> bool {
        self.transition(Screen::Login, Screen::Registration)
    }

    /// Registration → Login
    pub fn back_to_login(&self) -> bool {
        self.transition(Screen::Registration, Screen::Login)
    }

    /// Submit the login form; only available on [`Screen::Login`]
    pub async fn submit_login(&self, fields: FormFields) -> AppResult<GateSignal> {
        self.expect_screen(Screen::Login)?;
        let signal = self.login.submit_login(fields).await;
        self.follow(signal);
        Ok(signal)
    }

    /// Submit the registration form; only available on [`Screen::Registration`]
    pub async fn submit_registration(&self, fields: FormFields) -> AppResult<GateSignal> {
        self.expect_screen(Screen::Registration)?;
        let signal = self.registration.submit_registration(fields).await;
        self.follow(signal);
        Ok(signal)
    }

    /// Log out of both forms and go back to the login screen
    pub fn logout(&self) {
        self.login.logout();
        self.registration.logout();
        self.transition(Screen::Main, Screen::Login);
    }

    fn expect_screen(&self, expected: Screen) -> AppResult<()> {
        let current = self.screen();
        if current == expected {
            Ok(())
        } else {
            Err(
                AppError::conflict(format!("Not available on the {current} screen"))
                    .with_action(format!("Go to the {expected} screen first")),
            )
        }
    }

    /// Login | Registration → Main on an accepted submit
    ///
    /// The user may have switched forms while the call was in flight.
    fn follow(&self, signal: GateSignal) {
        if signal != GateSignal::NavigateToMain {
            return;
        }
        if !self.transition(Screen::Login, Screen::Main) {
            self.transition(Screen::Registration, Screen::Main);
        }
    }

    /// Move `from → to`; ignored when the current screen is not `from`
    fn transition(&self, from: Screen, to: Screen) -> bool {
        let moved = self.screen.send_if_modified(|screen| {
            if *screen == from {
                *screen = to;
                true
            } else {
                false
            }
        });
        if moved {
            tracing::debug!(from = %from, to = %to, "Screen changed");
        }
        moved
    }
}
