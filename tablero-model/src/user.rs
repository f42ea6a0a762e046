//! User records as the backend serves them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A signed-in principal.
///
/// Only the fields the client actually reads are modelled; everything else
/// the backend sends is kept verbatim in `extra` so that a record written
/// back to local storage round-trips without losing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,
    /// Display name
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account email, doubles as the login identifier
    #[serde(rename = "correo", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role slug, e.g. `"admin"` or `"cliente"`
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Backend fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Whether the record carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Apply a shallow patch: fields present in `patch` replace the current
    /// values, absent fields are retained. The identifier never changes.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(role) = patch.role {
            self.role = Some(role);
        }
        for (key, value) in patch.extra {
            self.extra.insert(key, value);
        }
    }
}

/// Partial user update for [`User::apply`].
///
/// Mirrors the wire names of [`User`]; a field left as `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    /// Replacement display name
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement email
    #[serde(rename = "correo", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement role slug
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Unmodelled fields to upsert
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserPatch {
    /// Patch that only changes the role.
    pub fn role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }
}
