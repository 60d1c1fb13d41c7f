//! Async flow tests for the gate and the screen controller

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use crate::domain::identity::IdentityProvider;
    use crate::domain::value_object::auth_outcome::AuthOutcome;

    /// Provider with a fixed outcome that can hold calls in flight
    pub struct ScriptedProvider {
        outcome: Mutex<AuthOutcome>,
        release: Option<Arc<Notify>>,
        sign_in_calls: AtomicUsize,
        create_calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedProvider {
        pub fn answering(outcome: AuthOutcome) -> Self {
            Self {
                outcome: Mutex::new(outcome),
                release: None,
                sign_in_calls: AtomicUsize::new(0),
                create_calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        /// Calls wait until `release` is notified
        pub fn held(outcome: AuthOutcome, release: Arc<Notify>) -> Self {
            Self {
                release: Some(release),
                ..Self::answering(outcome)
            }
        }

        pub fn set_outcome(&self, outcome: AuthOutcome) {
            *self.outcome.lock().unwrap() = outcome;
        }

        pub fn sign_in_calls(&self) -> usize {
            self.sign_in_calls.load(Ordering::SeqCst)
        }

        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        pub fn seen(&self) -> Vec<(String, String)> {
            self.seen.lock().unwrap().clone()
        }

        fn record(&self, identifier: &str, secret: &str) {
            self.seen
                .lock()
                .unwrap()
                .push((identifier.to_string(), secret.to_string()));
        }

        async fn resolve(&self) -> AuthOutcome {
            if let Some(release) = &self.release {
                release.notified().await;
            }
            let outcome = self.outcome.lock().unwrap().clone();
            outcome
        }
    }

    impl IdentityProvider for ScriptedProvider {
        async fn sign_in(&self, identifier: &str, secret: &str) -> AuthOutcome {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.record(identifier, secret);
            self.resolve().await
        }

        async fn create_account(&self, identifier: &str, secret: &str) -> AuthOutcome {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.record(identifier, secret);
            self.resolve().await
        }
    }
}

#[cfg(test)]
mod gate_tests {
    use std::sync::Arc;

    use tokio::sync::Notify;
    use tokio_test::{assert_pending, assert_ready_eq};

    use super::support::ScriptedProvider;
    use crate::application::auth_gate::{AuthGate, GateSignal, GateState};
    use crate::domain::entity::session::Session;
    use crate::domain::form_validator::FormValidator;
    use crate::domain::value_object::{
        auth_outcome::AuthOutcome, field::Field, form_fields::FormFields,
    };
    use crate::error::AuthError;

    fn gate(provider: Arc<ScriptedProvider>) -> AuthGate<ScriptedProvider> {
        AuthGate::new(provider, Arc::new(Session::new()), FormValidator::default())
    }

    #[tokio::test]
    async fn test_empty_login_never_calls_provider() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider.clone());

        let signal = gate.submit_login(FormFields::login("", "")).await;

        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(provider.sign_in_calls(), 0);
        let state = gate.state();
        let errors = state.error().and_then(AuthError::validation).unwrap();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Username, Field::Password]
        );
        assert!(!gate.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_success_authenticates() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider.clone());

        let signal = gate.submit_login(FormFields::login("alice", "pw")).await;

        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(gate.state(), GateState::Authenticated);
        assert!(gate.session().is_authenticated());
        assert_eq!(gate.session().user_name().as_deref(), Some("alice"));
        assert_eq!(provider.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_reason_is_verbatim() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::failure(
            "wrong password",
        )));
        let gate = gate(provider);

        let signal = gate.submit_login(FormFields::login("alice", "pw")).await;

        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(
            gate.state(),
            GateState::Rejected(AuthError::Authentication("wrong password".to_string()))
        );
        assert_eq!(
            gate.state().error().and_then(AuthError::reason),
            Some("wrong password")
        );
        assert!(!gate.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_retry_after_rejection() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::failure(
            "wrong password",
        )));
        let gate = gate(provider.clone());

        gate.submit_login(FormFields::login("alice", "bad")).await;
        provider.set_outcome(AuthOutcome::Success);
        let signal = gate.submit_login(FormFields::login("alice", "good")).await;

        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(provider.sign_in_calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected() {
        let release = Arc::new(Notify::new());
        let provider = Arc::new(ScriptedProvider::held(AuthOutcome::Success, release.clone()));
        let gate = gate(provider.clone());

        let mut first = tokio_test::task::spawn(gate.submit_login(FormFields::login("alice", "pw")));
        assert_pending!(first.poll());
        assert_eq!(gate.state(), GateState::Submitting);

        let second = gate.submit_login(FormFields::login("alice", "pw")).await;
        assert_eq!(second, GateSignal::Busy);

        // Invalid input is not even validated into a rejection while busy
        let third = gate.submit_login(FormFields::login("", "")).await;
        assert_eq!(third, GateSignal::Busy);
        assert_eq!(gate.state(), GateState::Submitting);

        release.notify_one();
        assert!(first.is_woken());
        assert_ready_eq!(first.poll(), GateSignal::NavigateToMain);
        assert_eq!(provider.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_authenticated_is_noop() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider.clone());

        gate.submit_login(FormFields::login("alice", "pw")).await;
        let signal = gate.submit_login(FormFields::login("bob", "pw")).await;

        assert_eq!(signal, GateSignal::AlreadyAuthenticated);
        assert_eq!(provider.sign_in_calls(), 1);
        assert_eq!(gate.session().user_name().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_open_session_blocks_other_form() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let session = Arc::new(Session::new());
        let login = AuthGate::new(provider.clone(), session.clone(), FormValidator::default());
        let registration = AuthGate::new(provider.clone(), session.clone(), FormValidator::default());

        login.submit_login(FormFields::login("alice", "pw")).await;
        let signal = registration
            .submit_registration(FormFields::registration("mallory", "Abc123!@", "Abc123!@"))
            .await;

        assert_eq!(signal, GateSignal::AlreadyAuthenticated);
        assert_eq!(provider.create_calls(), 0);
        assert_eq!(registration.state(), GateState::Idle);
        assert_eq!(session.user_name().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_success_after_other_form_signed_in_is_dropped() {
        let release = Arc::new(Notify::new());
        let held = Arc::new(ScriptedProvider::held(AuthOutcome::Success, release.clone()));
        let session = Arc::new(Session::new());
        let registration = AuthGate::new(held.clone(), session.clone(), FormValidator::default());
        let login = AuthGate::new(
            Arc::new(ScriptedProvider::answering(AuthOutcome::Success)),
            session.clone(),
            FormValidator::default(),
        );

        let mut pending = tokio_test::task::spawn(
            registration
                .submit_registration(FormFields::registration("mallory", "Abc123!@", "Abc123!@")),
        );
        assert_pending!(pending.poll());

        assert_eq!(
            login.submit_login(FormFields::login("alice", "pw")).await,
            GateSignal::NavigateToMain
        );

        release.notify_one();
        assert_ready_eq!(pending.poll(), GateSignal::AlreadyAuthenticated);
        drop(pending);

        assert_eq!(registration.state(), GateState::Idle);
        assert_eq!(login.state(), GateState::Authenticated);
        assert_eq!(session.user_name().as_deref(), Some("alice"));
        assert_eq!(held.create_calls(), 1);
    }

    #[test]
    fn test_refused_signals_map_to_app_errors() {
        use kernel::error::kind::ErrorKind;

        let busy = GateSignal::Busy.to_app_error().unwrap();
        assert_eq!(busy.kind(), ErrorKind::Busy);
        assert!(busy.is_recoverable());

        let signed_in = GateSignal::AlreadyAuthenticated.to_app_error().unwrap();
        assert_eq!(signed_in.kind(), ErrorKind::Conflict);
        assert_eq!(signed_in.action(), Some("Log out first"));

        for signal in [
            GateSignal::NavigateToMain,
            GateSignal::StayOnForm,
            GateSignal::Discarded,
        ] {
            assert!(signal.to_app_error().is_none());
        }
    }

    #[tokio::test]
    async fn test_logout_then_login_again() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider.clone());

        gate.submit_login(FormFields::login("alice", "pw")).await;
        gate.logout();

        assert_eq!(gate.state(), GateState::Idle);
        assert!(!gate.session().is_authenticated());

        let signal = gate.submit_login(FormFields::login("alice", "pw")).await;
        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(gate.state(), GateState::Authenticated);
        assert!(gate.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_late_result_after_logout_is_discarded() {
        let release = Arc::new(Notify::new());
        let provider = Arc::new(ScriptedProvider::held(AuthOutcome::Success, release.clone()));
        let gate = gate(provider.clone());

        let mut pending =
            tokio_test::task::spawn(gate.submit_login(FormFields::login("alice", "pw")));
        assert_pending!(pending.poll());

        gate.logout();
        assert!(!gate.session().is_authenticated());
        // The call cannot be cancelled, so no second call may start
        assert_eq!(gate.state(), GateState::Submitting);
        assert_eq!(
            gate.submit_login(FormFields::login("alice", "pw")).await,
            GateSignal::Busy
        );

        release.notify_one();
        assert_ready_eq!(pending.poll(), GateSignal::Discarded);
        drop(pending);

        assert_eq!(gate.state(), GateState::Idle);
        assert!(!gate.session().is_authenticated());
        assert_eq!(provider.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn test_field_edited_clears_rejection() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider);

        gate.submit_login(FormFields::login("", "pw")).await;
        assert!(matches!(gate.state(), GateState::Rejected(_)));

        gate.field_edited();
        assert_eq!(gate.state(), GateState::Idle);

        // No-op outside Rejected
        gate.field_edited();
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_registration_never_calls_provider() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider.clone());

        let signal = gate
            .submit_registration(FormFields::registration("alice", "abc123", "abc123"))
            .await;

        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(provider.create_calls(), 0);
        let state = gate.state();
        let errors = state.error().and_then(AuthError::validation).unwrap();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Password]);
    }

    #[tokio::test]
    async fn test_valid_registration_creates_account() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::Success));
        let gate = gate(provider.clone());

        let signal = gate
            .submit_registration(FormFields::registration(" alice ", "Abc123!@", "Abc123!@"))
            .await;

        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(provider.create_calls(), 1);
        assert_eq!(provider.sign_in_calls(), 0);
        assert_eq!(
            provider.seen(),
            vec![("alice".to_string(), "Abc123!@".to_string())]
        );
    }

    #[tokio::test]
    async fn test_duplicate_account_is_rejected() {
        let provider = Arc::new(ScriptedProvider::answering(AuthOutcome::failure(
            "account already exists",
        )));
        let gate = gate(provider);

        let signal = gate
            .submit_registration(FormFields::registration("alice", "Abc123!@", "Abc123!@"))
            .await;

        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(
            gate.state().error().and_then(AuthError::reason),
            Some("account already exists")
        );
    }

    #[tokio::test]
    async fn test_dropped_submit_returns_to_idle() {
        let release = Arc::new(Notify::new());
        let provider = Arc::new(ScriptedProvider::held(AuthOutcome::Success, release));
        let gate = gate(provider);

        let mut pending =
            tokio_test::task::spawn(gate.submit_login(FormFields::login("alice", "pw")));
        assert_pending!(pending.poll());
        assert_eq!(gate.state(), GateState::Submitting);

        drop(pending);
        assert_eq!(gate.state(), GateState::Idle);
        assert!(!gate.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_subscriber_observes_transitions() {
        let release = Arc::new(Notify::new());
        let provider = Arc::new(ScriptedProvider::held(AuthOutcome::Success, release.clone()));
        let gate = Arc::new(gate(provider));
        let mut rx = gate.subscribe();

        let task = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.submit_login(FormFields::login("alice", "pw")).await })
        };

        rx.wait_for(GateState::is_submitting).await.unwrap();
        release.notify_one();
        rx.wait_for(|state| *state == GateState::Authenticated)
            .await
            .unwrap();

        assert_eq!(task.await.unwrap(), GateSignal::NavigateToMain);
    }
}

#[cfg(test)]
mod controller_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::application::app_controller::{AppController, Screen};
    use crate::application::auth_gate::{GateSignal, GateState};
    use crate::application::config::GateConfig;
    use crate::domain::value_object::form_fields::FormFields;
    use kernel::error::kind::ErrorKind;
    use crate::infra::memory::{ACCOUNT_EXISTS, INVALID_CREDENTIALS, InMemoryIdentityProvider};

    fn controller(provider: InMemoryIdentityProvider) -> AppController<InMemoryIdentityProvider> {
        AppController::new(Arc::new(provider), Arc::new(GateConfig::development()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_then_login() {
        let controller = AppController::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(GateConfig::default()),
        );
        assert_eq!(controller.screen(), Screen::Splash);

        let started = tokio::time::Instant::now();
        controller.start().await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(controller.screen(), Screen::Login);
    }

    #[tokio::test]
    async fn test_registration_screen_round_trip() {
        let controller = controller(InMemoryIdentityProvider::new());
        assert!(!controller.open_registration());

        controller.start().await;
        assert!(controller.open_registration());
        assert_eq!(controller.screen(), Screen::Registration);
        assert!(controller.back_to_login());
        assert_eq!(controller.screen(), Screen::Login);
        assert!(!controller.back_to_login());
    }

    #[tokio::test]
    async fn test_login_navigates_to_main_and_logout_back() {
        let controller =
            controller(InMemoryIdentityProvider::new().with_account("alice", "Abc123!@"));
        controller.start().await;
        let mut screens = controller.subscribe_screen();

        let signal = controller
            .submit_login(FormFields::login("alice", "Abc123!@"))
            .await
            .unwrap();
        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(controller.screen(), Screen::Main);
        assert!(screens.has_changed().unwrap());
        assert_eq!(*screens.borrow_and_update(), Screen::Main);
        assert!(controller.session().is_authenticated());

        assert!(!controller.open_registration());

        controller.logout();
        assert_eq!(controller.screen(), Screen::Login);
        assert!(!controller.session().is_authenticated());
        assert_eq!(controller.login_gate().state(), GateState::Idle);
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_login() {
        let controller =
            controller(InMemoryIdentityProvider::new().with_account("alice", "Abc123!@"));
        controller.start().await;

        let signal = controller
            .submit_login(FormFields::login("alice", "nope"))
            .await
            .unwrap();

        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(controller.screen(), Screen::Login);
        let state = controller.login_gate().state();
        assert_eq!(
            state.error().and_then(|e| e.reason()),
            Some(INVALID_CREDENTIALS)
        );
    }

    #[tokio::test]
    async fn test_register_logout_login() {
        let controller = controller(InMemoryIdentityProvider::new());
        controller.start().await;
        controller.open_registration();

        let signal = controller
            .submit_registration(FormFields::registration("bob", "Abc123!@", "Abc123!@"))
            .await
            .unwrap();
        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(controller.screen(), Screen::Main);
        assert_eq!(controller.session().user_name().as_deref(), Some("bob"));

        controller.logout();
        assert_eq!(controller.screen(), Screen::Login);
        assert_eq!(controller.registration_gate().state(), GateState::Idle);

        let signal = controller
            .submit_login(FormFields::login("bob", "Abc123!@"))
            .await
            .unwrap();
        assert_eq!(signal, GateSignal::NavigateToMain);
        assert_eq!(controller.screen(), Screen::Main);
    }

    #[tokio::test]
    async fn test_duplicate_registration_stays() {
        let controller =
            controller(InMemoryIdentityProvider::new().with_account("bob", "Abc123!@"));
        controller.start().await;
        controller.open_registration();

        let signal = controller
            .submit_registration(FormFields::registration("bob", "Xyz789#&", "Xyz789#&"))
            .await
            .unwrap();

        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(controller.screen(), Screen::Registration);
        assert_eq!(
            controller
                .registration_gate()
                .state()
                .error()
                .and_then(|e| e.reason()),
            Some(ACCOUNT_EXISTS)
        );
    }

    #[tokio::test]
    async fn test_policy_comes_from_config() {
        let config = GateConfig {
            password_policy: GateConfig::default().password_policy.with_min_length(12),
            ..GateConfig::development()
        };
        let controller = AppController::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(config),
        );
        controller.start().await;
        controller.open_registration();

        let signal = controller
            .submit_registration(FormFields::registration("bob", "Abc123!@", "Abc123!@"))
            .await
            .unwrap();
        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(controller.registration_gate().validator().policy().min_length(), 12);
    }

    #[tokio::test]
    async fn test_submit_is_refused_outside_its_screen() {
        let controller =
            controller(InMemoryIdentityProvider::new().with_account("alice", "Abc123!@"));

        let err = controller
            .submit_login(FormFields::login("alice", "Abc123!@"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(controller.screen(), Screen::Splash);
        assert!(!controller.session().is_authenticated());
        assert_eq!(controller.login_gate().state(), GateState::Idle);

        controller.start().await;
        assert_eq!(controller.screen(), Screen::Login);

        let err = controller
            .submit_registration(FormFields::registration("bob", "Abc123!@", "Abc123!@"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(controller.screen(), Screen::Login);
        assert_eq!(controller.registration_gate().state(), GateState::Idle);
    }

    #[tokio::test]
    async fn test_registration_cannot_replace_signed_in_user() {
        let controller =
            controller(InMemoryIdentityProvider::new().with_account("alice", "Abc123!@"));
        controller.start().await;
        controller
            .submit_login(FormFields::login("alice", "Abc123!@"))
            .await
            .unwrap();

        let signal = controller
            .registration_gate()
            .submit_registration(FormFields::registration("mallory", "Xyz789#&", "Xyz789#&"))
            .await;
        assert_eq!(signal, GateSignal::AlreadyAuthenticated);
        assert_eq!(controller.screen(), Screen::Main);
        assert_eq!(controller.session().user_name().as_deref(), Some("alice"));
        assert_eq!(controller.registration_gate().state(), GateState::Idle);

        // No account was created
        controller.logout();
        let signal = controller
            .submit_login(FormFields::login("mallory", "Xyz789#&"))
            .await
            .unwrap();
        assert_eq!(signal, GateSignal::StayOnForm);
        assert_eq!(controller.screen(), Screen::Login);
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();

        assert_eq!(config.splash_duration, Duration::from_secs(2));
        assert_eq!(config.splash_duration_ms(), 2000);
        assert_eq!(config.password_policy, PasswordPolicy::default());
        assert_eq!(config.password_policy.min_length(), 8);
    }

    #[test]
    fn test_development_config() {
        let config = GateConfig::development();

        assert!(config.splash_duration.is_zero());
        assert_eq!(config.password_policy, PasswordPolicy::default());
    }
}
