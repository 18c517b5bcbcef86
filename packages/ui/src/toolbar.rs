use dioxus::prelude::*;

use crate::actions;
use crate::auth::{observe_rejection, use_auth, use_gateway, LogoutButton};
use crate::error_banner::ErrorBanner;
use crate::forms::ProfileForm;
use crate::icons::{FaHouse, FaUserGear, FaUsers};
use crate::views::ModalOverlay;
use crate::workflow::Workflow;
use crate::Icon;

const NAV_BUTTON: &str =
    "flex items-center gap-2 bg-gray-700 hover:bg-gray-600 px-3 py-1 rounded transition-colors cursor-pointer";

/// Top bar shared by the protected screens.
///
/// The "Usuarios" entry only shows for admins; the server still enforces it.
/// "Editar usuario" opens the rename-self dialog.
#[component]
pub fn Toolbar(title: String, on_dashboard: EventHandler<()>, on_users: EventHandler<()>) -> Element {
    let session = use_auth();
    let gateway = use_gateway();

    let mut show_rename = use_signal(|| false);
    let mut form = use_signal(ProfileForm::default);
    let mut workflow = use_signal(Workflow::new);

    let is_admin = session.read().is_admin();
    let busy = workflow.read().is_busy();

    let open_rename = move |_| {
        workflow.write().dismiss();
        show_rename.set(true);
    };

    let mut close_rename = move || {
        if !workflow.peek().is_busy() {
            show_rename.set(false);
        }
    };

    let rename = move |_| {
        let gateway = gateway.clone();
        spawn(async move {
            let result =
                actions::rename_self(&mut workflow, &mut form, &mut show_rename, &gateway).await;
            if let Err(rejected) = result {
                observe_rejection(session, &rejected);
            }
        });
    };

    rsx! {
        div {
            class: "w-full bg-gray-800 text-white flex items-center justify-between px-6 py-3 shadow-md",
            div {
                class: "flex items-center space-x-4",
                h1 { class: "text-xl font-bold", "{title}" }
                button {
                    class: NAV_BUTTON,
                    onclick: move |_| on_dashboard.call(()),
                    Icon { icon: FaHouse, width: 14, height: 14 }
                    "Dashboard"
                }
                if is_admin {
                    button {
                        class: NAV_BUTTON,
                        onclick: move |_| on_users.call(()),
                        Icon { icon: FaUsers, width: 14, height: 14 }
                        "Usuarios"
                    }
                }
                button {
                    class: NAV_BUTTON,
                    onclick: open_rename,
                    Icon { icon: FaUserGear, width: 14, height: 14 }
                    "Editar usuario"
                }
            }
            LogoutButton {
                class: "bg-red-600 hover:bg-red-800 cursor-pointer px-3 py-1 rounded transition-colors",
            }
        }

        if show_rename() {
            ModalOverlay {
                on_close: move |_| close_rename(),
                locked: busy,
                h2 { class: "text-lg font-semibold text-gray-700 mb-4", "Actualizar nombre de usuario" }
                ErrorBanner { message: workflow.read().error().map(str::to_string) }
                input {
                    class: "text-gray-700 w-full border border-gray-300 hover:border-gray-400 rounded px-3 py-2 mb-4",
                    r#type: "text",
                    placeholder: "Nuevo nombre de usuario",
                    disabled: busy,
                    value: "{form.read().username}",
                    oninput: move |evt: FormEvent| form.write().username = evt.value(),
                }
                div {
                    class: "flex justify-between gap-2 mt-2",
                    button {
                        class: "px-4 py-2 text-gray-700 rounded-md bg-gray-200 hover:bg-gray-300 cursor-pointer",
                        disabled: busy,
                        onclick: move |_| close_rename(),
                        "Cancelar"
                    }
                    button {
                        class: "px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50 cursor-pointer",
                        disabled: busy,
                        onclick: rename,
                        if busy { "Actualizando..." } else { "Actualizar" }
                    }
                }
            }
        }
    }
}
