use dioxus::prelude::*;
use ui::views::DashboardView;

use super::ProtectedShell;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        ProtectedShell {
            DashboardView {}
        }
    }
}
