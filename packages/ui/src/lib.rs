//! # UI crate — controllers and screens of the parking console
//!
//! The state machines are plain Rust so they can be driven from tests; the
//! Dioxus components wire them to signals.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | Auth session controller and route guard decisions |
//! | [`workflow`] | Idle/pending/done lifecycle shared by every mutating action |
//! | [`actions`] | Per-control drivers: request, then clear, close or re-read on success |
//! | [`records`] | Tab-scoped record synchronizer with stale-response protection |
//! | [`clock`] | Live duration labels and the ticking hook |
//! | [`forms`] | Form state and local validation messages |
//! | [`state`] | The [`StateCell`] seam between controllers and signals |
//! | [`platform`] | Credential store and gateway for the current build target |
//! | [`views`] | Login, dashboard and user administration screens |

pub mod actions;
pub mod clock;
pub mod forms;
pub mod platform;
pub mod records;
pub mod session;
pub mod state;
pub mod workflow;

pub mod views;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{
    observe_error, observe_rejection, use_auth, use_config, use_gateway, AuthProvider,
    LogoutButton, SessionSignal,
};

mod error_banner;
pub use error_banner::ErrorBanner;

mod toolbar;
pub use toolbar::Toolbar;

pub use platform::{make_gateway, make_store, ConsoleGateway, ConsoleTransport, PlatformStore};
pub use session::{fallback_destination, redirect_for, AuthSession, Destination, Gate};
pub use state::{SharedCell, StateCell};
pub use workflow::{Phase, Rejected, Workflow};
