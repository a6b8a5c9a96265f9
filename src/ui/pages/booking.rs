use dioxus::prelude::*;

use crate::{
    app::Controllers,
    ui::{
        components::{
            cargo_details::CargoDetails,
            cargo_table::CargoTable,
            toast::{push_toast, toast_booking_error, toast_resource_error, ToastKind, ToastMessage},
        },
        hooks::use_watch,
    },
};

#[component]
pub fn BookingPage() -> Element {
    let controllers = use_context::<Controllers>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let booking = controllers.booking.clone();

    let state = use_watch({
        let booking = booking.clone();
        move || booking.subscribe()
    });
    let cargos = use_watch({
        let store = controllers.cargo_list.store().clone();
        move || store.subscribe()
    });

    let _activation = use_future({
        let booking = booking.clone();
        let list = controllers.cargo_list.clone();
        move || {
            let booking = booking.clone();
            let list = list.clone();
            async move {
                if let Err(err) = booking.load_locations().await {
                    toast_resource_error(toasts, "Could not load locations", &err);
                }
                if let Err(err) = list.refresh().await {
                    toast_resource_error(toasts, "Could not load cargos", &err);
                }
            }
        }
    });

    let on_origin = {
        let booking = booking.clone();
        move |evt: FormEvent| booking.select_origin(evt.value())
    };
    let on_destination = {
        let booking = booking.clone();
        move |evt: FormEvent| booking.select_destination(evt.value())
    };
    let on_deadline = {
        let booking = booking.clone();
        move |evt: FormEvent| booking.set_deadline_input(evt.value())
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let booking = booking.clone();
        spawn(async move {
            match booking.book_cargo().await {
                Ok(cargo) => push_toast(
                    toasts,
                    ToastKind::Success,
                    format!("Booked cargo {}", cargo.tracking_id),
                ),
                Err(err) => toast_booking_error(toasts, &err),
            }
        });
    };

    let snapshot = state();
    let origin = snapshot.selection.origin.clone().unwrap_or_default();
    let destination = snapshot.selection.destination.clone().unwrap_or_default();
    let same_place = !origin.is_empty() && origin == destination;

    rsx! {
        section { class: "page",
            h2 { "Book new cargo" }
            form { class: "panel booking-form", onsubmit: on_submit,
                label { class: "field",
                    span { "Origin" }
                    select { class: "input", value: "{origin}", onchange: on_origin,
                        for location in snapshot.locations.iter() {
                            option {
                                value: "{location.locode}",
                                selected: location.locode == origin,
                                "{location.display_name} ({location.locode})"
                            }
                        }
                    }
                }
                label { class: "field",
                    span { "Destination" }
                    select { class: "input", value: "{destination}", onchange: on_destination,
                        for location in snapshot.locations.iter() {
                            option {
                                value: "{location.locode}",
                                selected: location.locode == destination,
                                "{location.display_name} ({location.locode})"
                            }
                        }
                    }
                }
                label { class: "field",
                    span { "Arrival deadline" }
                    input {
                        class: "input",
                        r#type: "date",
                        value: "{snapshot.selection.deadline_input}",
                        oninput: on_deadline,
                    }
                }
                button { class: "button primary", r#type: "submit", "Book" }
                if snapshot.pending > 0 {
                    span { class: "muted", "Booking…" }
                }
                if same_place {
                    p { class: "hint", "Origin and destination are the same location." }
                }
            }
            if let Some(cargo) = snapshot.last_booked.clone() {
                h3 { "Last booked" }
                CargoDetails { cargo }
            }
            h3 { "Cargos" }
            CargoTable { cargos: cargos() }
        }
    }
}
