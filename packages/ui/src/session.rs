//! # Auth session controller
//!
//! [`AuthSession`] wraps a [`CredentialStore`] and exposes one fact, "is someone
//! logged in", plus the role used for advisory UI gating. It is the only writer
//! of the store:
//!
//! - **logged out → logged in**: [`AuthSession::sign_in`], after a successful login
//!   response. The credential is persisted first, then the flag flips.
//! - **logged in → logged out**: [`AuthSession::sign_out`] (explicit logout) or
//!   [`AuthSession::observe`] when an authenticated request comes back 401 and
//!   unauthorized sign-out is enabled.
//!
//! The components wrap it in a `Signal`, so screens subscribe to it instead of
//! re-reading storage. Route guards are a pure function of the flag, see
//! [`redirect_for`].

use api::ApiError;
use store::{Credential, CredentialStore, Role};

#[derive(Clone, Debug)]
pub struct AuthSession<S> {
    store: S,
    credential: Option<Credential>,
    sign_out_on_unauthorized: bool,
}

impl<S: CredentialStore> AuthSession<S> {
    /// Start from whatever the store holds.
    pub fn new(store: S) -> Self {
        let credential = store.load();
        Self {
            store,
            credential,
            sign_out_on_unauthorized: true,
        }
    }

    pub fn with_unauthorized_sign_out(mut self, enabled: bool) -> Self {
        self.sign_out_on_unauthorized = enabled;
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.credential.as_ref().map(|credential| credential.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|role| role.is_admin())
    }

    pub fn sign_in(&mut self, credential: Credential) {
        self.store.save(&credential);
        tracing::info!(role = %credential.role, "signed in");
        self.credential = Some(credential);
    }

    pub fn sign_out(&mut self) {
        self.store.clear();
        if self.credential.take().is_some() {
            tracing::info!("signed out");
        }
    }

    /// React to a failed request. Returns `true` when the failure ended the session.
    pub fn observe(&mut self, error: &ApiError) -> bool {
        if !(self.sign_out_on_unauthorized && self.is_logged_in() && error.is_unauthorized()) {
            return false;
        }
        tracing::warn!("session rejected by server, signing out");
        self.sign_out();
        true
    }
}

/// Which side of the login wall a screen lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Only makes sense logged out (the login screen).
    Public,
    /// Requires a session.
    Protected,
}

/// Where a guard sends the user instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// The login screen.
    Entry,
    /// The dashboard.
    Landing,
}

/// Route guard: `None` means render the screen.
pub fn redirect_for(gate: Gate, logged_in: bool) -> Option<Destination> {
    match (gate, logged_in) {
        (Gate::Public, true) => Some(Destination::Landing),
        (Gate::Protected, false) => Some(Destination::Entry),
        _ => None,
    }
}

/// Where an unknown path goes.
pub fn fallback_destination(logged_in: bool) -> Destination {
    if logged_in {
        Destination::Landing
    } else {
        Destination::Entry
    }
}
