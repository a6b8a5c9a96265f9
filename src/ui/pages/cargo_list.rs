use dioxus::prelude::*;

use crate::{
    app::Controllers,
    ui::{
        components::{
            cargo_table::CargoTable,
            toast::{push_toast, toast_resource_error, ToastKind, ToastMessage},
        },
        hooks::use_watch,
    },
};

#[component]
pub fn CargoListPage() -> Element {
    let controllers = use_context::<Controllers>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let list = controllers.cargo_list.clone();

    let cargos = use_watch({
        let store = list.store().clone();
        move || store.subscribe()
    });

    // Fetch on every activation of the view.
    let _activation = use_future({
        let list = list.clone();
        move || {
            let list = list.clone();
            async move {
                if let Err(err) = list.refresh().await {
                    toast_resource_error(toasts, "Could not load cargos", &err);
                }
            }
        }
    });

    let on_refresh = move |_| {
        let list = list.clone();
        spawn(async move {
            match list.refresh().await {
                Ok(count) => push_toast(toasts, ToastKind::Info, format!("Loaded {count} cargos")),
                Err(err) => toast_resource_error(toasts, "Could not load cargos", &err),
            }
        });
    };

    rsx! {
        section { class: "page",
            div { class: "page-heading",
                h2 { "All cargos" }
                button { class: "button", onclick: on_refresh, "Refresh" }
            }
            CargoTable { cargos: cargos() }
        }
    }
}
