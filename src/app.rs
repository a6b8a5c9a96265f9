use dioxus::prelude::*;

use crate::{
    config::AppConfig,
    controllers::{
        BookingWorkflowController, CargoListController, CargoListStore, TrackingQueryController,
    },
    domain::{Cargo, Location},
    infra::{http_client, HttpResource, ResourceError},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{BookingPage, CargoListPage, TrackPage},
        shell::Shell,
    },
    util::assets,
};

pub const APP_NAME: &str = "Cargo Tracker";

pub type CargoResource = HttpResource<Cargo>;
pub type LocationResource = HttpResource<Location>;

/// Every controller the views use, wired to one registry.
#[derive(Clone)]
pub struct Controllers {
    pub tracking: TrackingQueryController<CargoResource>,
    pub cargo_list: CargoListController<CargoResource>,
    pub booking: BookingWorkflowController<CargoResource, LocationResource>,
}

impl PartialEq for Controllers {
    fn eq(&self, other: &Self) -> bool {
        self.cargo_list.store().same_store(other.cargo_list.store())
    }
}

impl Controllers {
    pub fn from_config(config: &AppConfig) -> Result<Self, ResourceError> {
        let base = config.api_base()?;
        let http = http_client()?;
        let cargos = HttpResource::new(http.clone(), &base, "cargos")?;
        let locations = HttpResource::new(http, &base, "locations")?;

        let cargo_list = CargoListController::new(cargos.clone(), CargoListStore::new());
        Ok(Self {
            tracking: TrackingQueryController::new(cargos.clone())
                .with_ordering(config.query_ordering),
            booking: BookingWorkflowController::new(cargos, locations, cargo_list.clone()),
            cargo_list,
        })
    }
}

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/track")]
    Track {},
    #[route("/cargos")]
    Cargos {},
    #[route("/booking")]
    Booking {},
}

#[component]
pub fn App() -> Element {
    let wiring = use_hook(|| {
        let config = AppConfig::load();
        tracing::info!(
            api = %config.api_base_url,
            ordering = ?config.query_ordering,
            "starting {APP_NAME}"
        );
        Controllers::from_config(&config).map_err(|err| err.to_string())
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        match wiring {
            Ok(controllers) => rsx! { Tracker { controllers } },
            Err(message) => rsx! { StartupError { message } },
        }
    }
}

#[component]
fn Tracker(controllers: Controllers) -> Element {
    use_context_provider(|| controllers.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    rsx! {
        Router::<Route> {}
        Toast {}
    }
}

#[component]
fn StartupError(message: String) -> Element {
    rsx! {
        div { class: "startup-error",
            h1 { "{APP_NAME} could not start" }
            p { "{message}" }
            p { class: "muted", "Check CARGO_TRACKER_API_URL or the config file." }
        }
    }
}

#[component]
pub fn Track() -> Element {
    rsx! { Shell { TrackPage {} } }
}

#[component]
pub fn Cargos() -> Element {
    rsx! { Shell { CargoListPage {} } }
}

#[component]
pub fn Booking() -> Element {
    rsx! { Shell { BookingPage {} } }
}
