//! # Credential models
//!
//! The two values the console keeps between page loads: the bearer token handed
//! out by the login endpoint and the caller's role.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | `admin` or `common`, serialised in lowercase exactly as the server sends it. |
//! | [`Credential`] | Token + role pair. Created on login, dropped on logout, never edited in place. |
//!
//! The token is opaque: no shape check is made here or anywhere else on the
//! client, it is forwarded verbatim as `Authorization: Bearer <token>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role as reported by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Common,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Common => "common",
        }
    }

    /// Label shown in role pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Common => "Común",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or typed role is neither `admin` nor `common`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "common" => Ok(Role::Common),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The signed-in caller: bearer token and role.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub role: Role,
}

impl Credential {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }
}

// Keeps the token out of `{:?}` output (and therefore out of logs).
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
