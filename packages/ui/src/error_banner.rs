use dioxus::prelude::*;

/// Red alert panel with a bold "Error:" prefix. Renders nothing without a message.
#[component]
pub fn ErrorBanner(#[props(!optional)] message: Option<String>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "bg-red-100 border border-red-400 text-red-700 px-4 py-3 shadow mb-4",
            role: "alert",
            strong { class: "font-semibold", "Error: " }
            span { class: "block sm:inline", "{message}" }
        }
    }
}
