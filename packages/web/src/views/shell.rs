use dioxus::prelude::*;
use ui::{redirect_for, use_auth, Gate, Toolbar};

use crate::Route;

const TITLE: &str = "Gestión de Estacionamiento";

/// Renders `children` only on the right side of the login wall.
///
/// Re-evaluated whenever the session changes, so a logout or an expired token
/// moves a protected screen back to the login page.
#[component]
pub fn Guarded(gate: Gate, children: Element) -> Element {
    let session = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if let Some(destination) = redirect_for(gate, session.read().is_logged_in()) {
            tracing::debug!(?gate, ?destination, "route guard redirect");
            nav.replace(Route::from(destination));
        }
    });

    if redirect_for(gate, session.read().is_logged_in()).is_some() {
        return rsx! {};
    }

    rsx! {
        {children}
    }
}

/// Guard plus toolbar for every screen behind the login.
#[component]
pub fn ProtectedShell(children: Element) -> Element {
    let nav = use_navigator();

    rsx! {
        Guarded {
            gate: Gate::Protected,
            div {
                class: "min-h-screen flex flex-col items-center bg-gray-300 text-gray-800",
                Toolbar {
                    title: TITLE.to_string(),
                    on_dashboard: move |_| {
                        nav.push(Route::Dashboard {});
                    },
                    on_users: move |_| {
                        nav.push(Route::Users {});
                    },
                }
                {children}
            }
        }
    }
}
