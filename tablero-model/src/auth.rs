//! Request and response payloads for the backend's `/auth` endpoints.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Login identifier
    #[serde(rename = "correo")]
    pub email: String,
    /// Plaintext secret, only ever sent over the wire
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Body for `POST /auth/registro`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name for the new account
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Successful login/registration payload: `{ "token": ..., "usuario": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer credential
    pub token: String,
    /// The authenticated principal
    #[serde(rename = "usuario")]
    pub user: User,
}

/// Body of `GET /auth/verificar`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Whether the presented token is still valid
    pub success: bool,
}

/// Error envelope the backend attaches to rejected requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message, e.g. `"Credenciales inválidas"`
    #[serde(rename = "mensaje", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
