use dioxus::prelude::*;
use ui::views::LoginView;
use ui::Gate;

use super::Guarded;

/// Login page; logged-in visitors go straight to the dashboard.
#[component]
pub fn Login() -> Element {
    rsx! {
        Guarded {
            gate: Gate::Public,
            LoginView {}
        }
    }
}
