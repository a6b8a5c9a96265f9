pub mod booking;
pub mod cargo_list;
pub mod track;

pub use booking::BookingPage;
pub use cargo_list::CargoListPage;
pub use track::TrackPage;
