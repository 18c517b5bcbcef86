use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close` unless `locked` is set,
/// which keeps a dialog open while its request is in flight.
#[component]
pub fn ModalOverlay(
    on_close: EventHandler<()>,
    #[props(default)] locked: bool,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 flex items-center justify-center bg-black/50",
            style: "z-index: 50",
            onclick: move |_| {
                if !locked {
                    on_close.call(());
                }
            },
            div {
                class: "bg-white rounded-lg shadow-lg p-6 max-w-md w-full mx-4 text-gray-800",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}
