//! Error types for the session lifecycle
//!
//! Typed errors via thiserror; the manager converts every failure a UI
//! cares about into either an [`AuthFailure`] (login/register) or a
//! [`SessionError`] variant.

use thiserror::Error;

/// Top-level session error type
#[derive(Debug, Error)]
pub enum SessionError {
    /// Durable credential storage failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Request to the backend failed
    #[error("network error: {0}")]
    Network(NetworkError),

    /// The backend rejected the held token; the global expiry reaction
    /// has already run
    #[error("session expired")]
    Expired,

    /// Operation requires an authenticated session
    #[error("not authenticated")]
    NotAuthenticated,
}

/// A 401 anywhere means the session is gone; every other network failure
/// stays a network failure.
impl From<NetworkError> for SessionError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Unauthorized { .. } => SessionError::Expired,
            other => SessionError::Network(other),
        }
    }
}

/// Durable storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to initialize storage: {0}")]
    InitFailed(String),

    #[error("failed to read from storage")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write to storage")]
    WriteFailed(#[source] std::io::Error),

    /// The stored pair is half-present or the user record does not parse.
    /// Treated exactly like a failed token verification.
    #[error("stored credentials are malformed")]
    Malformed,
}

/// Backend transport and protocol errors
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport failure, no response received
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The response body was not what the endpoint promises
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP 401; carries the backend message when one was sent
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// Any other non-success status
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
}

impl NetworkError {
    /// The backend's human-readable message, when the failure carried one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            NetworkError::Unauthorized { message } | NetworkError::Rejected { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

/// Failure result of `login`/`register`: a message ready for inline
/// display, never a raw transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthFailure {
    /// Backend `mensaje` when present, generic fallback otherwise
    pub message: String,
}

impl AuthFailure {
    pub(crate) fn from_network(err: NetworkError, fallback: &str) -> Self {
        let message = err
            .backend_message()
            .unwrap_or(fallback)
            .to_string();
        Self { message }
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
