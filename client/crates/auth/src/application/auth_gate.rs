//! Auth Gate
//!
//! Sequences submit actions: validate locally, call the identity provider
//! only when the form is valid, and turn the provider's outcome into a
//! navigation signal.
//!
//! ## States
//! `Idle → Submitting → {Authenticated, Rejected}`. `Rejected` returns to
//! `Idle` on the next edit; `Authenticated` holds until logout.
//!
//! ## Concurrency
//! Every transition runs inside the state channel's write lock, so the
//! check-and-set on submit admits at most one in-flight provider call per
//! gate. A submit that arrives while `Submitting` returns
//! [`GateSignal::Busy`] without calling the provider. The provider call is
//! the only suspension point and no timeout is imposed here.
//!
//! ## Shared session
//! The login and registration gates share one [`Session`]. A gate refuses
//! to submit while the session is open, and a success never replaces an
//! open session: whoever opened it first keeps it until logout.
//!
//! ## Logout during a call
//! `logout()` clears the session at once but cannot cancel the call. The
//! attempt stays `Submitting` until its outcome arrives; that outcome is
//! then discarded and the gate returns to `Idle`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use kernel::error::app_error::AppError;
use tokio::sync::watch;

use crate::domain::entity::session::Session;
use crate::domain::form_validator::FormValidator;
use crate::domain::identity::IdentityProvider;
use crate::domain::value_object::{
    auth_outcome::AuthOutcome, form_fields::FormFields, validation_result::ValidationResult,
};
use crate::error::AuthError;

/// Observable state of a gate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    /// Ready for a submit
    #[default]
    Idle,
    /// Waiting for the identity provider
    Submitting,
    /// Signed in; terminal until logout
    Authenticated,
    /// Last submit failed; the error is shown until the next edit
    Rejected(AuthError),
}

impl GateState {
    /// Get string code for logs
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Authenticated => "authenticated",
            Self::Rejected(_) => "rejected",
        }
    }

    #[inline]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Error to render, if rejected
    pub fn error(&self) -> Option<&AuthError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What the UI should do after a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    /// Credentials accepted: show the main screen
    NavigateToMain,
    /// Rejected: stay on the form and render the gate's error
    StayOnForm,
    /// A previous submit is still in flight; nothing was done
    Busy,
    /// The session is already open; nothing was done
    AlreadyAuthenticated,
    /// The outcome arrived after a logout and was dropped
    Discarded,
}

impl GateSignal {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NavigateToMain => "navigate_to_main",
            Self::StayOnForm => "stay_on_form",
            Self::Busy => "busy",
            Self::AlreadyAuthenticated => "already_authenticated",
            Self::Discarded => "discarded",
        }
    }

    /// Error to show for a submit that was not carried out
    pub fn to_app_error(&self) -> Option<AppError> {
        match self {
            Self::Busy => Some(
                AppError::busy("A previous submit is still in progress")
                    .with_action("Please wait for it to finish"),
            ),
            Self::AlreadyAuthenticated => Some(
                AppError::conflict("Already signed in").with_action("Log out first"),
            ),
            Self::NavigateToMain | Self::StayOnForm | Self::Discarded => None,
        }
    }
}

impl fmt::Display for GateSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    SignIn,
    CreateAccount,
}

impl Operation {
    const fn code(self) -> &'static str {
        match self {
            Operation::SignIn => "sign_in",
            Operation::CreateAccount => "create_account",
        }
    }
}

/// Submit sequencer for one form instance
pub struct AuthGate<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    session: Arc<Session>,
    validator: FormValidator,
    state: watch::Sender<GateState>,
    /// Bumped by every logout; a call started under an older epoch is stale
    logout_epoch: AtomicU64,
}

impl<P> AuthGate<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, session: Arc<Session>, validator: FormValidator) -> Self {
        Self {
            provider,
            session,
            validator,
            state: watch::Sender::new(GateState::Idle),
            logout_epoch: AtomicU64::new(0),
        }
    }

    /// Current state
    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    #[inline]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[inline]
    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    /// Submit the login form
    ///
    /// The provider is called only if user name and password are present.
    pub async fn submit_login(&self, fields: FormFields) -> GateSignal {
        let validation = self.validator.validate_login(&fields);
        self.submit(Operation::SignIn, fields, validation).await
    }

    /// Submit the registration form
    ///
    /// The provider is called only if the full registration check passes.
    pub async fn submit_registration(&self, fields: FormFields) -> GateSignal {
        let validation = self.validator.validate_registration(&fields);
        self.submit(Operation::CreateAccount, fields, validation).await
    }

    /// A field changed: clear a shown rejection
    pub fn field_edited(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, GateState::Rejected(_)) {
                *state = GateState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Close the session and return to `Idle`
    ///
    /// An in-flight call keeps the gate `Submitting` until it resolves; its
    /// outcome is then discarded.
    pub fn logout(&self) {
        self.state.send_modify(|state| {
            self.logout_epoch.fetch_add(1, Ordering::SeqCst);
            self.session.clear();
            if !state.is_submitting() {
                *state = GateState::Idle;
            }
        });
        tracing::info!("User logged out");
    }

    async fn submit(
        &self,
        operation: Operation,
        fields: FormFields,
        validation: ValidationResult,
    ) -> GateSignal {
        let epoch = match self.begin(validation) {
            Ok(epoch) => epoch,
            Err(signal) => {
                tracing::debug!(
                    operation = operation.code(),
                    signal = ?signal,
                    "Submit not forwarded to identity provider"
                );
                return signal;
            }
        };

        let mut in_flight = InFlight {
            state: &self.state,
            settled: false,
        };

        let identifier = fields.identifier();
        tracing::debug!(
            operation = operation.code(),
            user_name = %identifier,
            "Calling identity provider"
        );

        let outcome = match operation {
            Operation::SignIn => self.provider.sign_in(identifier, fields.password()).await,
            Operation::CreateAccount => {
                self.provider
                    .create_account(identifier, fields.password())
                    .await
            }
        };

        in_flight.settled = true;
        self.finish(operation, identifier, epoch, outcome)
    }

    /// Admit a submit: `Ok(epoch)` when the provider should be called
    fn begin(&self, validation: ValidationResult) -> Result<u64, GateSignal> {
        let mut admitted = None;

        self.state.send_if_modified(|state| match state {
            GateState::Submitting => {
                admitted = Some(Err(GateSignal::Busy));
                false
            }
            GateState::Authenticated => {
                admitted = Some(Err(GateSignal::AlreadyAuthenticated));
                false
            }
            // The session is shared with the other form's gate
            GateState::Idle | GateState::Rejected(_) if self.session.is_authenticated() => {
                admitted = Some(Err(GateSignal::AlreadyAuthenticated));
                false
            }
            GateState::Idle | GateState::Rejected(_) => {
                if validation.is_valid() {
                    *state = GateState::Submitting;
                    admitted = Some(Ok(self.logout_epoch.load(Ordering::SeqCst)));
                } else {
                    let err = AuthError::from(validation);
                    err.log();
                    *state = GateState::Rejected(err);
                    admitted = Some(Err(GateSignal::StayOnForm));
                }
                true
            }
        });

        admitted.unwrap_or(Err(GateSignal::Busy))
    }

    /// Apply the provider's outcome
    fn finish(
        &self,
        operation: Operation,
        identifier: &str,
        epoch: u64,
        outcome: AuthOutcome,
    ) -> GateSignal {
        let mut signal = GateSignal::Discarded;

        self.state.send_modify(|state| {
            if self.logout_epoch.load(Ordering::SeqCst) != epoch {
                tracing::debug!(
                    operation = operation.code(),
                    "Discarding identity provider result received after logout"
                );
                *state = GateState::Idle;
                return;
            }

            match outcome {
                AuthOutcome::Success if !self.session.open(identifier) => {
                    tracing::debug!(
                        operation = operation.code(),
                        "Discarding identity provider result: another form opened the session"
                    );
                    *state = GateState::Idle;
                    signal = GateSignal::AlreadyAuthenticated;
                }
                AuthOutcome::Success => {
                    tracing::info!(
                        operation = operation.code(),
                        user_name = %identifier,
                        "User authenticated"
                    );
                    *state = GateState::Authenticated;
                    signal = GateSignal::NavigateToMain;
                }
                AuthOutcome::Failure(reason) => {
                    let err = AuthError::Authentication(reason);
                    err.log();
                    *state = GateState::Rejected(err);
                    signal = GateSignal::StayOnForm;
                }
            }
        });

        signal
    }
}

/// Returns the gate to `Idle` if a submit future is dropped mid-call
struct InFlight<'a> {
    state: &'a watch::Sender<GateState>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.state.send_if_modified(|state| {
            if state.is_submitting() {
                *state = GateState::Idle;
                true
            } else {
                false
            }
        });
    }
}
