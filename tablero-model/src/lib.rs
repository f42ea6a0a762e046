//! Shared data models for the Tablero admin console.
//!
//! The backend speaks Spanish on the wire (`correo`, `contrasena`,
//! `usuario`, `mensaje`); these types keep English field names on the Rust
//! side and map to the wire names through serde renames, so neither side
//! leaks into the other.

pub mod auth;
pub mod user;

pub use auth::{AuthResponse, Credentials, ErrorBody, RegisterRequest, VerifyResponse};
pub use user::{User, UserPatch};
