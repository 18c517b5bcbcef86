use dioxus::prelude::*;
use ui::views::UsersView;

use super::ProtectedShell;

#[component]
pub fn Users() -> Element {
    rsx! {
        ProtectedShell {
            UsersView {}
        }
    }
}
