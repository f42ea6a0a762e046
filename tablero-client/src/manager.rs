//! Session manager
//!
//! Single owner of the authentication lifecycle: the in-memory session
//! state, the durable credential pair, and the API client's token slot.
//! Every mutation keeps the three consistent; they may diverge only while
//! one of the suspending operations is in flight.
//!
//! ## Startup behavior
//!
//! `restore_session` runs exactly once, before the route guard's first
//! decision. It promotes a stored credential pair back into a live session
//! only after the backend re-validates the token; any failure on that path
//! (absent pair, malformed pair, network error, explicit rejection)
//! resolves silently to the anonymous state.
//!
//! ## Expiry behavior
//!
//! The manager registers a handler on the API client at construction.
//! When any backend call answers 401, the handler clears the stored pair,
//! resets the session, and sends the user to the login screen unless the
//! UI is already on the login or registration screen.

use std::sync::Arc;

use log::{info, warn};
use tablero_model::{AuthResponse, Credentials, RegisterRequest, User, UserPatch, VerifyResponse};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::errors::{AuthFailure, SessionError, SessionResult};
use crate::navigate::Navigator;
use crate::session::{Session, SessionStore};
use crate::storage::CredentialStore;

const LOGIN_FALLBACK: &str = "Error al iniciar sesión";
const REGISTER_FALLBACK: &str = "Error al registrar usuario";

/// Owner of the client-side authentication lifecycle
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    session: SessionStore,
    store: Arc<CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("api", &self.api)
            .field("session", &self.session.current())
            .field("store", &self.store)
            .finish()
    }
}

impl SessionManager {
    /// Create a manager against the configured backend, storing
    /// credentials in the platform data directory.
    pub fn new(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> SessionResult<Self> {
        let store = CredentialStore::new()?;
        Ok(Self::with_parts(
            ApiClient::new(config.api_url.clone()),
            store,
            navigator,
        ))
    }

    /// Create a manager from explicit parts. Used by tests and by
    /// embeddings that manage their own storage location.
    pub fn with_parts(
        api: ApiClient,
        store: CredentialStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let manager = Self {
            api,
            session: SessionStore::new(),
            store: Arc::new(store),
            navigator,
        };

        // Global 401 reaction, fired from whichever call trips it
        let handler = manager.clone();
        manager.api.set_expiry_handler(move || {
            let manager = handler.clone();
            async move { manager.handle_expiry().await }
        });

        manager
    }

    /// The session state store, for route guards and UI components.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The authorized API client, for collaborators that fetch data
    /// outside the auth endpoints.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Restore a previous session from the durable store.
    ///
    /// Invoked once at startup. Never surfaces an error: every failure
    /// path lands in the anonymous state, clearing whatever was stored.
    pub async fn restore_session(&self) {
        let stored = match self.store.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                info!("[SessionManager] No stored credentials");
                self.session.reset();
                return;
            }
            Err(e) => {
                warn!("[SessionManager] Discarding stored credentials: {}", e);
                self.discard_credentials().await;
                self.session.reset();
                return;
            }
        };

        self.api.set_token(Some(stored.token.clone())).await;
        match self.api.get::<VerifyResponse>("/auth/verificar").await {
            Ok(VerifyResponse { success: true }) => {
                info!(
                    "[SessionManager] Restored session for user {}",
                    stored.user.id
                );
                self.session.authenticate(stored.user, stored.token);
            }
            Ok(VerifyResponse { success: false }) => {
                info!("[SessionManager] Stored token is no longer valid");
                self.api.set_token(None).await;
                self.discard_credentials().await;
                self.session.reset();
            }
            Err(e) => {
                warn!("[SessionManager] Session verification failed: {}", e);
                self.api.set_token(None).await;
                self.discard_credentials().await;
                self.session.reset();
            }
        }
    }

    /// Authenticate against the backend.
    ///
    /// On success the credential pair is persisted and the session
    /// hydrated. On failure the session is left untouched and the error
    /// carries a display-ready message.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AuthFailure> {
        match self.api.post("/auth/login", &credentials).await {
            Ok(auth) => {
                self.apply_auth(&auth).await;
                Ok(auth)
            }
            Err(e) => Err(AuthFailure::from_network(e, LOGIN_FALLBACK)),
        }
    }

    /// Create an account. Same contract as [`login`](Self::login).
    pub async fn register(&self, profile: RegisterRequest) -> Result<AuthResponse, AuthFailure> {
        match self.api.post("/auth/registro", &profile).await {
            Ok(auth) => {
                self.apply_auth(&auth).await;
                Ok(auth)
            }
            Err(e) => Err(AuthFailure::from_network(e, REGISTER_FALLBACK)),
        }
    }

    async fn apply_auth(&self, auth: &AuthResponse) {
        if let Err(e) = self.store.save(&auth.token, &auth.user).await {
            // The live session still works; only the restart path is lost
            warn!("[SessionManager] Failed to persist credentials: {}", e);
        }
        self.api.set_token(Some(auth.token.clone())).await;
        self.session.authenticate(auth.user.clone(), auth.token.clone());
        info!("[SessionManager] Authenticated user {}", auth.user.id);
    }

    /// End the session locally. Idempotent, no backend call, always
    /// succeeds.
    pub async fn logout(&self) {
        self.discard_credentials().await;
        self.api.set_token(None).await;
        self.session.reset();
        info!("[SessionManager] Session closed");
    }

    /// Shallow-merge `patch` into the current user and persist the merged
    /// record alongside the existing token.
    ///
    /// Requires an authenticated session.
    pub async fn update_user(&self, patch: UserPatch) -> SessionResult<User> {
        let (mut user, token) = self
            .session
            .with_state(|session| match session {
                Session::Authenticated { user, token } => Some((user.clone(), token.clone())),
                _ => None,
            })
            .ok_or(SessionError::NotAuthenticated)?;

        user.apply(patch);
        self.store.save(&token, &user).await?;
        self.session.authenticate(user.clone(), token);
        Ok(user)
    }

    /// Fetch the signed-in user's profile from the backend.
    pub async fn profile(&self) -> SessionResult<User> {
        Ok(self.api.get("/auth/perfil").await?)
    }

    /// Reaction to a 401 from any backend call: drop the durable pair,
    /// reset the session, and return to the login screen unless the UI is
    /// already on an auth screen.
    async fn handle_expiry(&self) {
        warn!("[SessionManager] Session expired, returning to login");
        self.discard_credentials().await;
        self.session.reset();
        if !self.navigator.current_route().is_auth_screen() {
            self.navigator.go_to_login();
        }
    }

    async fn discard_credentials(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("[SessionManager] Failed to clear stored credentials: {}", e);
        }
    }
}
