//! Session Entity
//!
//! Client-side authentication status. One instance is owned by the
//! application controller and shared by reference with the gates; there
//! is no ambient global session.
//!
//! Only a gate writes to it: set on a successful sign-in or account
//! creation, cleared on logout. Nothing else survives a logout.

use tokio::sync::watch;

/// Authentication status of the running client
#[derive(Debug)]
pub struct Session {
    /// `Some(user name)` while authenticated
    user: watch::Sender<Option<String>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            user: watch::Sender::new(None),
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// User name the session was opened for
    pub fn user_name(&self) -> Option<String> {
        self.user.borrow().clone()
    }

    /// Receive a notification whenever the session opens or closes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.user.subscribe()
    }

    /// Open for `user_name`; `false` if a session is already open
    pub(crate) fn open(&self, user_name: &str) -> bool {
        self.user.send_if_modified(|user| {
            if user.is_some() {
                return false;
            }
            *user = Some(user_name.to_string());
            true
        })
    }

    pub(crate) fn clear(&self) {
        self.user.send_replace(None);
    }
}
