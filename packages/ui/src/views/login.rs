use dioxus::prelude::*;

use crate::actions;
use crate::auth::{use_auth, use_gateway};
use crate::error_banner::ErrorBanner;
use crate::forms::LoginForm;
use crate::icons::FaCarSide;
use crate::workflow::Workflow;
use crate::Icon;

const INPUT: &str = "w-full border border-gray-300 rounded-lg px-3 py-2 focus:outline-none focus:ring-1 focus:ring-gray-400 hover:border-gray-400";

/// Username/password form.
///
/// A successful login stores the credential and flips the session; the route
/// guard then moves on to the dashboard.
#[component]
pub fn LoginView() -> Element {
    let mut session = use_auth();
    let gateway = use_gateway();

    let mut form = use_signal(LoginForm::default);
    let mut workflow = use_signal(Workflow::new);

    let busy = workflow.read().is_busy();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let gateway = gateway.clone();
        spawn(async move {
            let result = actions::log_in(&mut workflow, &form, &mut session, &gateway).await;
            if let Err(rejected) = result {
                tracing::debug!(?rejected, "login not accepted");
            }
        });
    };

    rsx! {
        div {
            class: "min-h-screen flex flex-col items-center justify-center bg-gray-300 text-gray-800",
            h1 { class: "text-3xl font-bold mb-8", "Gestión de Estacionamiento" }
            div {
                class: "w-full max-w-md bg-white shadow-lg rounded-2xl p-8",
                div {
                    class: "flex justify-center text-gray-700",
                    Icon { icon: FaCarSide, width: 64, height: 64 }
                }
                h2 { class: "text-2xl font-semibold text-center mb-6 text-gray-700", "Inicio de Sesión" }

                ErrorBanner { message: workflow.read().error().map(str::to_string) }

                form {
                    class: "space-y-5",
                    onsubmit: onsubmit,
                    div {
                        label { r#for: "username", class: "block text-sm font-medium text-gray-600 mb-1", "Usuario" }
                        input {
                            id: "username",
                            class: INPUT,
                            r#type: "text",
                            placeholder: "Ingresa tu usuario",
                            disabled: busy,
                            value: "{form.read().username}",
                            oninput: move |evt: FormEvent| form.write().username = evt.value(),
                        }
                    }
                    div {
                        label { r#for: "password", class: "block text-sm font-medium text-gray-600 mb-1", "Contraseña" }
                        input {
                            id: "password",
                            class: INPUT,
                            r#type: "password",
                            placeholder: "••••••••",
                            disabled: busy,
                            value: "{form.read().password}",
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }
                    button {
                        class: "w-full bg-gray-800 text-white py-2 rounded-lg hover:bg-gray-700 cursor-pointer disabled:opacity-50",
                        r#type: "submit",
                        disabled: busy,
                        if busy { "Iniciando..." } else { "Iniciar sesión" }
                    }
                }
            }
        }
    }
}
