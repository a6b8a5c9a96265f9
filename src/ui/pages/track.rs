use dioxus::prelude::*;

use crate::{
    app::Controllers,
    ui::{
        components::{
            cargo_details::CargoDetails,
            toast::{toast_resource_error, ToastMessage},
        },
        hooks::use_watch,
    },
};

#[component]
pub fn TrackPage() -> Element {
    let controllers = use_context::<Controllers>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let tracking = controllers.tracking.clone();

    let mut query = use_signal(String::new);
    let displayed = use_watch({
        let tracking = tracking.clone();
        move || tracking.subscribe()
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let tracking = tracking.clone();
        let requested = query().trim().to_string();
        spawn(async move {
            if let Err(err) = tracking.show_cargo(Some(&requested)).await {
                toast_resource_error(toasts, &format!("Could not load {requested}"), &err);
            }
        });
    };

    rsx! {
        section { class: "page",
            h2 { "Track your cargo" }
            form { class: "panel search", onsubmit: on_submit,
                input {
                    class: "input",
                    value: query(),
                    oninput: move |evt| query.set(evt.value().to_string()),
                    placeholder: "Tracking ID, e.g. ABC123",
                }
                button { class: "button primary", r#type: "submit", "Track" }
            }
            if let Some(cargo) = displayed() {
                CargoDetails { cargo }
            } else {
                p { class: "muted", "Enter a tracking ID to see where your cargo is." }
            }
        }
    }
}
