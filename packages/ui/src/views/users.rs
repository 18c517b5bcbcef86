use api::UserAccount;
use chrono::Local;
use dioxus::prelude::*;
use store::Role;

use crate::actions;
use crate::auth::{observe_error, observe_rejection, use_auth, use_gateway};
use crate::error_banner::ErrorBanner;
use crate::forms::{UserDialog, UserForm};
use crate::icons::{
    FaCalendar, FaCircleCheck, FaCircleXmark, FaPlus, FaShieldHalved, FaTrash, FaUser, FaUserPen,
};
use crate::views::ModalOverlay;
use crate::workflow::Workflow;
use crate::Icon;

const FIELD: &str = "w-full mb-3 border border-gray-300 hover:border-gray-400 rounded px-3 py-2";

/// Account administration: list, create, edit, activate/deactivate, delete.
///
/// The create/edit dialog and the per-card actions each have their own
/// workflow, so a pending delete does not lock the dialog and vice versa.
/// Non-admins get a notice and no request is made.
#[component]
pub fn UsersView() -> Element {
    let session = use_auth();
    let gateway = use_gateway();
    let is_admin = session.read().is_admin();

    let mut users = use_signal(Vec::<UserAccount>::new);
    let mut list_error = use_signal(|| Option::<String>::None);
    let mut dialog = use_signal(UserDialog::default);
    let mut form = use_signal(UserForm::default);
    let mut dialog_workflow = use_signal(Workflow::new);
    let mut card_workflow = use_signal(Workflow::new);

    let list_gateway = gateway.clone();
    let load_users = use_callback(move |_: ()| {
        let gateway = list_gateway.clone();
        spawn(async move {
            list_error.set(None);
            match gateway.users().await {
                Ok(list) => users.set(list),
                Err(error) => {
                    list_error.set(Some(error.message.clone()));
                    observe_error(session, &error);
                }
            }
        });
    });

    use_hook(move || {
        if is_admin {
            load_users.call(());
        }
    });

    let open_create = move |_| {
        form.set(UserForm::default());
        dialog_workflow.write().dismiss();
        dialog.set(UserDialog::Create);
    };

    let open_edit = use_callback(move |account: UserAccount| {
        form.set(UserForm::for_edit(&account));
        dialog_workflow.write().dismiss();
        dialog.set(UserDialog::Edit(account));
    });

    let mut close_dialog = move || {
        if dialog_workflow.peek().is_busy() {
            return;
        }
        dialog.set(UserDialog::Closed);
        dialog_workflow.write().dismiss();
    };

    let save_gateway = gateway.clone();
    let save = move |_| {
        let gateway = save_gateway.clone();
        spawn(async move {
            let result = actions::save_user(
                &mut dialog_workflow,
                &mut dialog,
                &mut form,
                &gateway,
                || load_users.call(()),
            )
            .await;
            if let Err(rejected) = result {
                observe_rejection(session, &rejected);
            }
        });
    };

    let delete_gateway = gateway.clone();
    let delete_user = use_callback(move |id: String| {
        let gateway = delete_gateway.clone();
        spawn(async move {
            let result =
                actions::delete_user(&mut card_workflow, &id, &gateway, || load_users.call(()))
                    .await;
            if let Err(rejected) = result {
                observe_rejection(session, &rejected);
            }
        });
    });

    let toggle_gateway = gateway.clone();
    let toggle_user = use_callback(move |(id, is_active): (String, bool)| {
        let gateway = toggle_gateway.clone();
        spawn(async move {
            let result = actions::set_user_active(&mut card_workflow, &id, is_active, &gateway, || {
                load_users.call(())
            })
            .await;
            if let Err(rejected) = result {
                observe_rejection(session, &rejected);
            }
        });
    });

    if !is_admin {
        return rsx! {
            div {
                class: "w-full max-w-5xl p-6",
                div {
                    class: "bg-yellow-100 border border-yellow-400 text-yellow-800 px-4 py-3 shadow",
                    role: "status",
                    "No tienes permisos para administrar usuarios."
                }
            }
        };
    }

    let dialog_open = dialog.read().is_open();
    let dialog_busy = dialog_workflow.read().is_busy();
    let card_busy = card_workflow.read().is_busy();
    let is_create = *dialog.read() == UserDialog::Create;
    let save_label = match (is_create, dialog_busy) {
        (true, true) => "Creando...",
        (true, false) => "Crear",
        (false, true) => "Actualizando...",
        (false, false) => "Actualizar",
    };

    rsx! {
        div {
            class: "w-full max-w-5xl p-6 space-y-6",
            if !dialog_open {
                ErrorBanner { message: list_error() }
                ErrorBanner { message: card_workflow.read().error().map(str::to_string) }
            }

            div {
                class: "flex justify-end mb-4",
                button {
                    class: "flex items-center gap-2 bg-green-700 text-white px-4 py-2 rounded-md hover:bg-green-800 cursor-pointer",
                    onclick: open_create,
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Crear Usuario"
                }
            }

            div {
                class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6",
                for account in users.read().iter() {
                    UserCard {
                        key: "{account.id}",
                        account: account.clone(),
                        busy: card_busy,
                        on_edit: open_edit,
                        on_toggle: toggle_user,
                        on_delete: delete_user,
                    }
                }
            }
        }

        if dialog_open {
            ModalOverlay {
                on_close: move |_| close_dialog(),
                locked: dialog_busy,
                h3 {
                    class: "text-lg font-semibold mb-2",
                    if is_create { "Crear Usuario" } else { "Editar Usuario" }
                }
                ErrorBanner { message: dialog_workflow.read().error().map(str::to_string) }
                input {
                    class: "w-full my-3 border border-gray-300 hover:border-gray-400 rounded px-3 py-2",
                    r#type: "text",
                    placeholder: "Usuario",
                    disabled: dialog_busy,
                    value: "{form.read().username}",
                    oninput: move |evt: FormEvent| form.write().username = evt.value(),
                }
                if is_create {
                    input {
                        class: FIELD,
                        r#type: "password",
                        placeholder: "Contraseña",
                        disabled: dialog_busy,
                        value: "{form.read().password}",
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                select {
                    class: "{FIELD} cursor-pointer",
                    disabled: dialog_busy,
                    value: "{form.read().role}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(role) = evt.value().parse::<Role>() {
                            form.write().role = role;
                        }
                    },
                    option { value: "common", selected: form.read().role == Role::Common, "{Role::Common.label()}" }
                    option { value: "admin", selected: form.read().role == Role::Admin, "{Role::Admin.label()}" }
                }
                div {
                    class: "flex items-center mb-3",
                    input {
                        class: "mr-2",
                        r#type: "checkbox",
                        disabled: dialog_busy,
                        checked: form.read().is_active,
                        onchange: move |evt: FormEvent| form.write().is_active = evt.checked(),
                    }
                    span { "Activo" }
                }
                div {
                    class: "flex justify-between gap-2 mt-5",
                    button {
                        class: "px-4 py-2 rounded-md bg-gray-200 hover:bg-gray-300 cursor-pointer",
                        disabled: dialog_busy,
                        onclick: move |_| close_dialog(),
                        "Cancelar"
                    }
                    button {
                        class: if is_create {
                            "px-4 py-2 rounded-md bg-green-600 text-white hover:bg-green-700 cursor-pointer"
                        } else {
                            "px-4 py-2 rounded-md bg-blue-600 text-white hover:bg-blue-700 cursor-pointer"
                        },
                        disabled: dialog_busy,
                        onclick: save,
                        "{save_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn UserCard(
    account: UserAccount,
    busy: bool,
    on_edit: EventHandler<UserAccount>,
    on_toggle: EventHandler<(String, bool)>,
    on_delete: EventHandler<String>,
) -> Element {
    let created = account
        .created_at
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string();
    let edit_target = account.clone();
    let toggle_target = (account.id.clone(), !account.is_active);
    let delete_target = account.id.clone();

    rsx! {
        div {
            class: "bg-white rounded-xl shadow-md p-5 flex flex-col justify-between border border-gray-400",
            div {
                class: "mb-4",
                p {
                    class: "text-xl font-bold text-gray-800 flex items-center gap-2",
                    Icon { icon: FaUser, width: 16, height: 16 }
                    "{account.username}"
                }
                p {
                    class: "text-gray-600 font-medium flex items-center gap-2",
                    Icon { icon: FaShieldHalved, width: 14, height: 14 }
                    "{account.role.label()}"
                }
            }
            div {
                class: "space-y-2 text-gray-700 text-sm",
                div {
                    class: "flex items-center justify-between",
                    span {
                        class: "flex items-center gap-1 font-semibold",
                        if account.is_active {
                            Icon { icon: FaCircleCheck, width: 12, height: 12, fill: "#22c55e" }
                        } else {
                            Icon { icon: FaCircleXmark, width: 12, height: 12, fill: "#ef4444" }
                        }
                        "Estado:"
                    }
                    span { "{account.status_label()}" }
                }
                div {
                    class: "flex items-center justify-between",
                    span {
                        class: "flex items-center gap-1 font-semibold",
                        Icon { icon: FaCalendar, width: 12, height: 12 }
                        "Creado:"
                    }
                    span { "{created}" }
                }
            }
            div {
                class: "flex justify-between gap-2 mt-4",
                button {
                    class: "flex-1 flex items-center justify-center gap-2 bg-blue-600 text-white py-2 rounded-md hover:bg-blue-700 cursor-pointer",
                    disabled: busy,
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    Icon { icon: FaUserPen, width: 14, height: 14 }
                    "Editar"
                }
                button {
                    class: "flex-1 flex items-center justify-center gap-2 bg-gray-600 text-white py-2 rounded-md hover:bg-gray-500 cursor-pointer",
                    disabled: busy,
                    onclick: move |_| on_toggle.call(toggle_target.clone()),
                    if account.is_active { "Desactivar" } else { "Activar" }
                }
                button {
                    class: "flex-1 flex items-center justify-center gap-2 bg-red-600 text-white py-2 rounded-md hover:bg-red-500 cursor-pointer",
                    disabled: busy,
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                    "Eliminar"
                }
            }
        }
    }
}
