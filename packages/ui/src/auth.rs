//! Authentication context and hooks for the UI.

use api::ApiError;
use dioxus::prelude::*;
use store::ConsoleConfig;

use crate::platform::{make_gateway, make_store, ConsoleGateway, PlatformStore};
use crate::session::AuthSession;
use crate::state::StateCell;
use crate::workflow::Rejected;

/// The session every screen subscribes to.
pub type SessionSignal = Signal<AuthSession<PlatformStore>>;

/// Get the current session.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> SessionSignal {
    use_context::<SessionSignal>()
}

/// The gateway shared by every screen. Cheap to clone.
pub fn use_gateway() -> ConsoleGateway {
    use_context::<ConsoleGateway>()
}

pub fn use_config() -> ConsoleConfig {
    use_context::<ConsoleConfig>()
}

/// End the session if `error` says the token was rejected.
pub fn observe_error(mut session: SessionSignal, error: &ApiError) {
    StateCell::update(&mut session, |session| session.observe(error));
}

pub fn observe_rejection(session: SessionSignal, rejected: &Rejected) {
    if let Some(error) = rejected.api_error() {
        observe_error(session, error);
    }
}

/// Provider component that owns the credential store, the gateway and the session.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ConsoleConfig, children: Element) -> Element {
    let gateway = use_hook(|| make_gateway(&config.api, make_store()));

    // The session writes the same store the gateway reads tokens from.
    let sign_out_on_unauthorized = config.session.sign_out_on_unauthorized;
    let session = use_signal(|| {
        AuthSession::new(gateway.credentials().clone())
            .with_unauthorized_sign_out(sign_out_on_unauthorized)
    });

    use_context_provider(move || config.clone());
    use_context_provider(move || gateway);
    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
///
/// Only clears the session; the route guards react to the flag and move to
/// the login screen.
#[component]
pub fn LogoutButton(
    #[props(default = "Cerrar sesión".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_auth();

    let onclick = move |_| session.write().sign_out();

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
