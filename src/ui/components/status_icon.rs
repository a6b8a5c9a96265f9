use dioxus::prelude::*;

use crate::domain::status_icon;

#[component]
pub fn StatusIconBadge(on_time: Option<bool>) -> Element {
    let icon = status_icon(on_time);

    rsx! {
        span {
            class: "status-icon {icon}",
            title: "{icon}",
            "{icon.glyph()}"
        }
    }
}
