use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

/// A trackable shipment as served by the cargo registry.
///
/// The client only ever holds a read-only copy of the registry's record; every
/// field except `tracking_id` tolerates being absent in the payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cargo {
    pub tracking_id: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub arrival_deadline: Option<OffsetDateTime>,
    #[serde(default)]
    pub status_text: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub eta: Option<OffsetDateTime>,
    #[serde(default)]
    pub next_expected_activity: String,
    #[serde(default)]
    pub events: Vec<CargoEvent>,
    /// Routing status reported by the registry, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misrouted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legs: Vec<Leg>,
}

impl Cargo {
    /// Whether the cargo is on track. `None` when the registry did not say.
    pub fn on_time(&self) -> Option<bool> {
        self.misrouted.map(|misrouted| !misrouted)
    }

    /// Booked but no itinerary assigned yet.
    pub fn awaiting_route(&self) -> bool {
        self.routed == Some(false)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoEvent {
    #[serde(alias = "description")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<bool>,
}

/// One voyage leg of an assigned itinerary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub voyage_number: String,
    pub from: String,
    pub to: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub load_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub unload_time: Option<OffsetDateTime>,
}

/// A place cargo can be shipped from or to, keyed by its UN/LOCODE.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub locode: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// Formats a registry timestamp for display, `-` when unknown.
pub fn display_timestamp(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|at| {
            at.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| "-".to_string())
}
