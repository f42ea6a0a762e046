//! Client-side session and authentication lifecycle for the Tablero
//! admin console.
//!
//! The console talks to a REST backend that owns all business logic; this
//! crate owns the one piece of client state with real lifecycle behavior:
//! who is logged in. The in-memory [`Session`], the durable credential
//! pair, and the bearer token attached to outgoing requests are kept
//! consistent by a single [`SessionManager`], which also reacts globally
//! when the backend says the credential is no longer good.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use tablero_client::{ClientConfig, NoopNavigator, SessionManager};
//!
//! # async fn run() -> Result<(), tablero_client::SessionError> {
//! let config = ClientConfig::load();
//! let manager = SessionManager::new(&config, Arc::new(NoopNavigator))?;
//!
//! // Once, at startup, before the first routing decision:
//! manager.restore_session().await;
//! let session = manager.session().settled().await;
//! println!("authenticated: {}", session.is_authenticated());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod manager;
pub mod navigate;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use errors::{AuthFailure, NetworkError, SessionError, SessionResult, StorageError};
pub use manager::SessionManager;
pub use navigate::{Navigator, NoopNavigator, Route};
pub use session::{Session, SessionStore};
pub use storage::{CredentialStore, StoredCredentials};
