//! View controllers. Each is built from the resource clients it needs and
//! publishes its display state through `tokio::sync::watch`.

pub mod booking;
pub mod cargo_list;
pub mod tracking;

#[allow(unused_imports)]
pub use booking::{BookingError, BookingSelection, BookingState, BookingWorkflowController, SelectionPhase};
pub use cargo_list::{CargoListController, CargoListStore};
#[allow(unused_imports)]
pub use tracking::{QueryOutcome, ResponseOrdering, TrackingQueryController};
