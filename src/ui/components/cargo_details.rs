use dioxus::prelude::*;

use super::status_icon::StatusIconBadge;
use crate::domain::{display_timestamp, Cargo};

#[component]
pub fn CargoDetails(cargo: Cargo) -> Element {
    let eta = display_timestamp(cargo.eta);
    let deadline = display_timestamp(cargo.arrival_deadline);

    rsx! {
        article { class: "panel cargo-details",
            header { class: "cargo-heading",
                StatusIconBadge { on_time: cargo.on_time() }
                h2 { "{cargo.tracking_id}" }
                if !cargo.status_text.is_empty() {
                    span { class: "muted", "{cargo.status_text}" }
                }
            }
            dl { class: "cargo-facts",
                dt { "Route" }
                dd { "{cargo.origin} → {cargo.destination}" }
                dt { "Arrival deadline" }
                dd { "{deadline}" }
                dt { "Estimated arrival" }
                dd { "{eta}" }
            }
            if cargo.awaiting_route() {
                p { class: "hint", "Not routed yet" }
            }
            if !cargo.next_expected_activity.is_empty() {
                p { class: "next-activity", "{cargo.next_expected_activity}" }
            }
            if !cargo.legs.is_empty() {
                h3 { "Itinerary" }
                table { class: "table",
                    thead {
                        tr {
                            th { "Voyage" }
                            th { "From" }
                            th { "To" }
                            th { "Load" }
                            th { "Unload" }
                        }
                    }
                    tbody {
                        for leg in cargo.legs.iter() {
                            tr {
                                td { "{leg.voyage_number}" }
                                td { "{leg.from}" }
                                td { "{leg.to}" }
                                td { "{display_timestamp(leg.load_time)}" }
                                td { "{display_timestamp(leg.unload_time)}" }
                            }
                        }
                    }
                }
            }
            if !cargo.events.is_empty() {
                h3 { "Handling history" }
                ul { class: "events",
                    for event in cargo.events.iter() {
                        li {
                            class: if event.expected == Some(false) { "event unexpected" } else { "event" },
                            "{event.text}"
                        }
                    }
                }
            }
        }
    }
}
