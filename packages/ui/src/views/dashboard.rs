use api::{ParkingRecord, Tab, VehicleType};
use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

use crate::actions;
use crate::auth::{observe_error, observe_rejection, use_auth, use_config, use_gateway};
use crate::clock::{elapsed_label, use_clock};
use crate::error_banner::ErrorBanner;
use crate::forms::{type_name, EntryForm};
use crate::icons::{FaCircleArrowDown, FaCircleArrowUp, FaClock, FaDollarSign};
use crate::records::{refresh, RecordSync};
use crate::workflow::Workflow;
use crate::Icon;

fn local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

/// Tariff table, entry form and the current/history record lists.
///
/// Entry and exit share one workflow: while either is in flight the entry
/// button, the exit buttons and the tab selector are disabled.
#[component]
pub fn DashboardView() -> Element {
    let session = use_auth();
    let gateway = use_gateway();
    let config = use_config();

    let mut types = use_signal(Vec::<VehicleType>::new);
    let mut types_error = use_signal(|| Option::<String>::None);
    let mut sync = use_signal(|| RecordSync::new(Tab::Current));
    let mut entry = use_signal(EntryForm::default);
    let mut workflow = use_signal(Workflow::new);
    let now = use_clock(config.clock.tick_interval());

    // Tariff table, once per mount
    let types_gateway = gateway.clone();
    let _types_loader = use_resource(move || {
        let gateway = types_gateway.clone();
        async move {
            match gateway.vehicle_types().await {
                Ok(list) => {
                    entry.write().default_type(&list);
                    types.set(list);
                    types_error.set(None);
                }
                Err(error) => {
                    types_error.set(Some(error.message.clone()));
                    observe_error(session, &error);
                }
            }
        }
    });

    let sync_gateway = gateway.clone();
    let reload = use_callback(move |_: ()| {
        let gateway = sync_gateway.clone();
        spawn(async move {
            if let Err(error) = refresh(&mut sync, &gateway).await {
                observe_error(session, &error);
            }
        });
    });

    use_hook(move || reload.call(()));

    let mut select_tab = move |tab: Tab| {
        if sync.write().select(tab) {
            reload.call(());
        }
    };

    let entry_gateway = gateway.clone();
    let register_entry = move |_| {
        let gateway = entry_gateway.clone();
        spawn(async move {
            let result =
                actions::register_entry(&mut workflow, &mut entry, &sync, &gateway, || {
                    reload.call(())
                })
                .await;
            if let Err(rejected) = result {
                observe_rejection(session, &rejected);
            }
        });
    };

    let exit_gateway = gateway.clone();
    let register_exit = use_callback(move |plate: String| {
        let gateway = exit_gateway.clone();
        spawn(async move {
            let result =
                actions::register_exit(&mut workflow, plate, &gateway, || reload.call(())).await;
            if let Err(rejected) = result {
                observe_rejection(session, &rejected);
            }
        });
    });

    let busy = workflow.read().is_busy();
    let active_tab = sync.read().tab();
    let tick = now();

    rsx! {
        div {
            class: "w-full max-w-5xl p-6 space-y-6",
            ErrorBanner { message: types_error() }
            ErrorBanner { message: sync.read().error().map(str::to_string) }
            ErrorBanner { message: workflow.read().error().map(str::to_string) }

            section {
                class: "bg-white rounded-lg shadow p-4 max-w-md mx-auto border border-gray-400",
                h2 { class: "text-lg font-semibold mb-3 text-center", "Tarifa de Vehículos" }
                ul {
                    class: "space-y-2",
                    for vehicle_type in types.read().iter() {
                        li {
                            key: "{vehicle_type.id}",
                            class: "flex items-center justify-between border-b border-gray-200 py-2 px-3",
                            div {
                                span { class: "font-medium", "{vehicle_type.name}" }
                                p { class: "text-sm text-gray-500", "{vehicle_type.description}" }
                            }
                            span { class: "font-semibold", "${vehicle_type.hourly_rate}/hr" }
                        }
                    }
                }
            }

            section {
                class: "space-y-4",
                h2 { class: "text-xl font-semibold mb-2 text-center", "Vehículos Parqueados" }
                div {
                    class: "flex justify-center mb-4",
                    for tab in Tab::ALL {
                        button {
                            key: "{tab}",
                            class: if tab == active_tab {
                                "px-4 py-2 font-medium border-b-2 bg-gray-800 text-white border-gray-800 cursor-pointer"
                            } else {
                                "px-4 py-2 font-medium border-b-2 bg-white text-gray-800 border-gray-300 hover:bg-gray-100 cursor-pointer"
                            },
                            disabled: busy,
                            onclick: move |_| select_tab(tab),
                            "{tab.label()}"
                        }
                    }
                }

                div {
                    class: "flex flex-col sm:flex-row mb-4 gap-2",
                    input {
                        class: "flex-1 border border-gray-300 rounded-lg px-3 py-2 bg-white",
                        r#type: "text",
                        placeholder: "Placa",
                        value: "{entry.read().plate()}",
                        oninput: move |evt: FormEvent| entry.write().set_plate(&evt.value()),
                    }
                    select {
                        class: "border border-gray-300 rounded-lg px-3 py-2 bg-white cursor-pointer w-full sm:w-1/4",
                        value: "{entry.read().vehicle_type_id}",
                        onchange: move |evt: FormEvent| entry.write().vehicle_type_id = evt.value(),
                        for vehicle_type in types.read().iter() {
                            option {
                                key: "{vehicle_type.id}",
                                value: "{vehicle_type.id}",
                                selected: vehicle_type.id == entry.read().vehicle_type_id,
                                "{vehicle_type.name}"
                            }
                        }
                    }
                    button {
                        class: "bg-green-700 text-white px-4 py-2 rounded-md hover:bg-green-800 cursor-pointer disabled:opacity-50",
                        disabled: busy,
                        onclick: register_entry,
                        "Registrar Entrada"
                    }
                }

                div {
                    class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6",
                    for record in sync.read().records().iter() {
                        RecordCard {
                            key: "{record.key()}",
                            record: record.clone(),
                            type_name: type_name(&types.read(), &record.vehicle_type_id).to_string(),
                            tab: active_tab,
                            elapsed: elapsed_label(record, tick),
                            busy: busy,
                            on_exit: register_exit,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordCard(
    record: ParkingRecord,
    type_name: String,
    tab: Tab,
    #[props(!optional)] elapsed: Option<String>,
    busy: bool,
    on_exit: EventHandler<String>,
) -> Element {
    let plate = record.license_plate.clone();
    let elapsed = elapsed.unwrap_or_default();
    let exit_time = record
        .exit_time
        .map(local_time)
        .unwrap_or_else(|| "-".to_string());
    let (hours, charge) = match record.billing() {
        Some((charge, hours)) => (hours.to_string(), format!("${charge}")),
        None => ("-".to_string(), "-".to_string()),
    };

    rsx! {
        div {
            class: "bg-white rounded-xl shadow-md p-5 flex flex-col justify-between border border-gray-400",
            div {
                class: "mb-4",
                p { class: "text-xl font-bold text-gray-800", "{record.license_plate}" }
                p { class: "text-gray-600 font-medium", "{type_name}" }
            }
            div {
                class: "space-y-2 text-gray-700 text-sm",
                div {
                    class: "flex items-center justify-between",
                    span {
                        class: "flex items-center gap-1 font-semibold",
                        Icon { icon: FaCircleArrowDown, width: 12, height: 12 }
                        "Entrada:"
                    }
                    span { "{local_time(record.entry_time)}" }
                }
                {match tab {
                    Tab::Current => rsx! {
                        div {
                            class: "flex items-center justify-between",
                            span {
                                class: "flex items-center gap-1 font-semibold",
                                Icon { icon: FaClock, width: 12, height: 12 }
                                "Estadía:"
                            }
                            span { "~{elapsed}" }
                        }
                    },
                    Tab::History => rsx! {
                        div {
                            class: "flex items-center justify-between",
                            span {
                                class: "flex items-center gap-1 font-semibold",
                                Icon { icon: FaCircleArrowUp, width: 12, height: 12 }
                                "Salida:"
                            }
                            span { "{exit_time}" }
                        }
                        div {
                            class: "flex items-center justify-between",
                            span {
                                class: "flex items-center gap-1 font-semibold",
                                Icon { icon: FaClock, width: 12, height: 12 }
                                "Horas:"
                            }
                            span { "{hours}" }
                        }
                        div {
                            class: "flex items-center justify-between",
                            span {
                                class: "flex items-center gap-1 font-semibold",
                                Icon { icon: FaDollarSign, width: 12, height: 12 }
                                "Cobro total:"
                            }
                            span { "{charge}" }
                        }
                    },
                }}
            }
            if tab == Tab::Current {
                button {
                    class: "mt-4 bg-red-600 text-white py-2 rounded-md hover:bg-red-800 font-medium cursor-pointer disabled:opacity-50",
                    disabled: busy,
                    onclick: move |_| on_exit.call(plate.clone()),
                    "Salida"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ConsoleGateway, ConsoleTransport};
    use crate::session::AuthSession;
    use api::{Gateway, StubTransport};
    use dioxus::dioxus_core::NoOpMutations;
    use serde_json::json;
    use std::time::Duration;
    use store::{ConsoleConfig, Credential, CredentialStore, MemoryStore, Role};

    fn signed_in_dashboard() -> Element {
        let gateway = use_gateway();
        let session = use_signal(|| AuthSession::new(gateway.credentials().clone()));
        use_context_provider(|| session);
        rsx! { DashboardView {} }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_ticks_do_not_refetch() {
        let transport = StubTransport::new();
        // Both loaders accept an empty list, whichever runs first.
        transport.respond_json(200, json!([])).respond_json(200, json!([]));
        let store = MemoryStore::new();
        store.save(&Credential::new("tok", Role::Common));
        let gateway: ConsoleGateway =
            Gateway::new(ConsoleTransport::Scripted(transport.clone()), store);
        let mut config = ConsoleConfig::default();
        config.clock.tick_interval_secs = 1;

        let mut dom = VirtualDom::new(signed_in_dashboard)
            .with_root_context(gateway)
            .with_root_context(config);
        dom.rebuild_in_place();

        // Only the ticker keeps the dom busy once both loaders are done.
        let mounted = tokio::time::Instant::now();
        while mounted.elapsed() < Duration::from_secs(5) {
            dom.wait_for_work().await;
            dom.render_immediate(&mut NoOpMutations);
        }

        let mut paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        paths.sort();
        assert_eq!(paths, vec!["/parking/current", "/vehicle-types"]);
    }
}
