pub mod cargo_details;
pub mod cargo_table;
pub mod status_icon;
pub mod toast;
