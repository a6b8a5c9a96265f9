use serde::Serialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Payload for `POST /cargos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub origin: String,
    pub destination: String,
    /// Epoch milliseconds.
    pub arrival_deadline: i64,
}

impl BookingRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        arrival_deadline: OffsetDateTime,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            arrival_deadline: epoch_millis(arrival_deadline),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no origin selected")]
    MissingOrigin,
    #[error("no destination selected")]
    MissingDestination,
    #[error("could not read arrival deadline {0:?}")]
    UnparsableDeadline(String),
}

/// Reads the deadline the user typed.
///
/// A bare `YYYY-MM-DD` (what a date input yields) is midnight UTC of that day.
/// Full RFC 3339 timestamps are taken as given.
pub fn parse_deadline(input: &str) -> Result<OffsetDateTime, ValidationError> {
    let trimmed = input.trim();
    if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Ok(date.midnight().assume_utc());
    }
    OffsetDateTime::parse(trimmed, &Rfc3339)
        .map_err(|_| ValidationError::UnparsableDeadline(input.to_string()))
}

fn epoch_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}
