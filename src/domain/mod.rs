//! Domain types for cargo tracking and booking.

pub mod booking;
pub mod entities;
pub mod status;

#[allow(unused_imports)]
pub use booking::{parse_deadline, BookingRequest, ValidationError};
#[allow(unused_imports)]
pub use entities::{display_timestamp, Cargo, CargoEvent, Leg, Location};
#[allow(unused_imports)]
pub use status::{status_icon, StatusIcon};
