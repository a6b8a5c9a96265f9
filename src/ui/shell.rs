use dioxus::prelude::*;

use crate::app::{Route, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { class: "app-title", "{APP_NAME}" }
                nav { class: "app-nav",
                    NavButton { active: matches!(current_route, Route::Track {}), onclick: move |_| { nav.push(Route::Track {}); }, label: "Track" }
                    NavButton { active: matches!(current_route, Route::Cargos {}), onclick: move |_| { nav.push(Route::Cargos {}); }, label: "All cargos" }
                    NavButton { active: matches!(current_route, Route::Booking {}), onclick: move |_| { nav.push(Route::Booking {}); }, label: "Book" }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active { "nav-button active" } else { "nav-button" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
