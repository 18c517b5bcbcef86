use serde::{Deserialize, Serialize};
use store::{Credential, Role};

/// Body of `POST /login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login: the token and role to persist, plus token metadata.
#[derive(Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    /// Token lifetime in seconds, informational only.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl LoginResponse {
    pub fn into_credential(self) -> Credential {
        Credential::new(self.token, self.role)
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("role", &self.role)
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}
