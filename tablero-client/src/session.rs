//! Session state management with a proper state machine
//!
//! A session is never "half logged in": the user record and the token
//! exist exactly when the state is `Authenticated`, so the invariant
//! `authenticated == (token present && user present)` holds by
//! construction.

use std::sync::Arc;

use tablero_model::User;
use tokio::sync::watch;

/// Authentication state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Startup restore has not finished; callers must treat the session
    /// as indeterminate, not as unauthenticated
    Initializing,

    /// No signed-in user
    Anonymous,

    /// Signed-in user with a bearer token
    Authenticated {
        user: User,
        /// Opaque bearer credential
        token: String,
    },
}

impl Session {
    /// Check if the state represents an authenticated user
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Whether the startup restore is still pending
    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Initializing)
    }

    /// Get the current user if authenticated
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Get the current bearer token if authenticated
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }
}

/// Thread-safe session store over a watch channel
///
/// One writer (the session manager), many cheap readers. Route guards and
/// UI components subscribe for changes instead of polling.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Session>>,
    receiver: watch::Receiver<Session>,
}

impl SessionStore {
    /// Create a new store in the `Initializing` state
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(Session::Initializing);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get the current session state
    pub fn current(&self) -> Session {
        self.receiver.borrow().clone()
    }

    /// Check if authenticated without cloning
    pub fn is_authenticated(&self) -> bool {
        self.receiver.borrow().is_authenticated()
    }

    /// Access state without cloning
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        f(&self.receiver.borrow())
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.receiver.clone()
    }

    /// Wait until the startup restore has settled, then return the state.
    /// Route guards call this before their first allow/deny decision.
    pub async fn settled(&self) -> Session {
        let mut receiver = self.receiver.clone();
        match receiver.wait_for(|session| !session.is_loading()).await {
            Ok(session) => session.clone(),
            // Sender gone means the state can no longer change
            Err(_) => self.current(),
        }
    }

    /// Update the session state
    pub(crate) fn set(&self, session: Session) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(session);
    }

    /// Transition to the authenticated state
    pub(crate) fn authenticate(&self, user: User, token: String) {
        self.set(Session::Authenticated { user, token });
    }

    /// Reset to the anonymous state
    pub(crate) fn reset(&self) {
        self.set(Session::Anonymous);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
