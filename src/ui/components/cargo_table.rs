use dioxus::prelude::*;

use super::status_icon::StatusIconBadge;
use crate::domain::{display_timestamp, Cargo};

#[component]
pub fn CargoTable(cargos: Vec<Cargo>) -> Element {
    if cargos.is_empty() {
        return rsx! {
            p { class: "muted", "No cargos booked yet." }
        };
    }

    rsx! {
        table { class: "table",
            thead {
                tr {
                    th {}
                    th { "Tracking ID" }
                    th { "Origin" }
                    th { "Destination" }
                    th { "Arrival deadline" }
                    th { "Status" }
                }
            }
            tbody {
                for cargo in cargos {
                    tr { key: "{cargo.tracking_id}",
                        td { StatusIconBadge { on_time: cargo.on_time() } }
                        td { class: "mono", "{cargo.tracking_id}" }
                        td { "{cargo.origin}" }
                        td { "{cargo.destination}" }
                        td { "{display_timestamp(cargo.arrival_deadline)}" }
                        td { "{cargo.status_text}" }
                    }
                }
            }
        }
    }
}
