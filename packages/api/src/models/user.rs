//! # User accounts
//!
//! [`UserAccount`] is the admin-facing view of an operator account. It never
//! carries a password; `created_at` is set by the server and never sent back.
//!
//! The request bodies mirror the admin endpoints:
//!
//! - [`NewUser`] → `POST /admin/users` (the only body with a password)
//! - [`UserUpdate`] → `PUT /admin/users/{id}`
//! - [`ActiveToggle`] → `PATCH /admin/users/{id}/active`
//! - [`ProfileUpdate`] → `PUT /users/me`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Role;

/// Account as listed by `GET /admin/users`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Activo"
        } else {
            "Inactivo"
        }
    }
}

#[derive(Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserUpdate {
    pub username: String,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActiveToggle {
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
}
