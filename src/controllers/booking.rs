//! Booking workflow: location selection, submission, and the list refresh
//! that follows a confirmed booking.
//!
//! Selection moves `Uninitialized -> LocationsLoaded -> UserAdjusted`. Each
//! [`BookingWorkflowController::book_cargo`] call is independent of any other
//! in flight; the number of pending calls is part of the published state.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use super::cargo_list::CargoListController;
use crate::domain::{parse_deadline, BookingRequest, Cargo, Location, ValidationError};
use crate::infra::{ResourceClient, ResourceError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPhase {
    #[default]
    Uninitialized,
    LocationsLoaded,
    UserAdjusted,
}

/// What the user has picked so far. Selectors accept any locode; nothing
/// here checks membership in the loaded locations or that origin and
/// destination differ.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingSelection {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub deadline_input: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingState {
    pub phase: SelectionPhase,
    pub locations: Vec<Location>,
    pub selection: BookingSelection,
    pub last_booked: Option<Cargo>,
    /// Bookings submitted and not yet answered.
    pub pending: usize,
    origin_pinned: bool,
    destination_pinned: bool,
}

impl BookingState {
    fn apply_locations(&mut self, locations: Vec<Location>) {
        let first = locations.first().map(|location| location.locode.clone());
        if !self.origin_pinned {
            self.selection.origin = first.clone();
        }
        if !self.destination_pinned {
            self.selection.destination = first;
        }
        self.locations = locations;
        if self.phase == SelectionPhase::Uninitialized {
            self.phase = SelectionPhase::LocationsLoaded;
        }
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("booking failed: {0}")]
    Create(#[source] ResourceError),
    #[error("booked {tracking_id}, but the cargo list could not be refreshed: {source}")]
    Refresh {
        tracking_id: String,
        #[source]
        source: ResourceError,
    },
}

pub struct BookingWorkflowController<C, L> {
    cargos: C,
    locations: L,
    cargo_list: CargoListController<C>,
    state: Arc<watch::Sender<BookingState>>,
}

impl<C: Clone, L: Clone> Clone for BookingWorkflowController<C, L> {
    fn clone(&self) -> Self {
        Self {
            cargos: self.cargos.clone(),
            locations: self.locations.clone(),
            cargo_list: self.cargo_list.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C, L> BookingWorkflowController<C, L>
where
    C: ResourceClient<Entity = Cargo>,
    L: ResourceClient<Entity = Location>,
{
    /// `cargo_list` is the list a confirmed booking refreshes.
    pub fn new(cargos: C, locations: L, cargo_list: CargoListController<C>) -> Self {
        let (tx, _) = watch::channel(BookingState::default());
        Self {
            cargos,
            locations,
            cargo_list,
            state: Arc::new(tx),
        }
    }

    pub fn state(&self) -> BookingState {
        self.state.borrow().clone()
    }

    pub fn selection(&self) -> BookingSelection {
        self.state.borrow().selection.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BookingState> {
        self.state.subscribe()
    }

    pub fn pending_bookings(&self) -> usize {
        self.state.borrow().pending
    }

    /// Fetches all locations and defaults unpinned selections to the first.
    pub async fn load_locations(&self) -> Result<usize, ResourceError> {
        let locations = self.locations.list().await.inspect_err(|err| {
            tracing::warn!(%err, "loading locations failed");
        })?;
        let count = locations.len();
        self.state
            .send_modify(|state| state.apply_locations(locations));
        tracing::info!(count, "locations loaded");
        Ok(count)
    }

    pub fn select_origin(&self, locode: impl Into<String>) {
        let locode = locode.into();
        self.state.send_modify(|state| {
            state.selection.origin = Some(locode);
            state.origin_pinned = true;
            state.phase = SelectionPhase::UserAdjusted;
        });
    }

    pub fn select_destination(&self, locode: impl Into<String>) {
        let locode = locode.into();
        self.state.send_modify(|state| {
            state.selection.destination = Some(locode);
            state.destination_pinned = true;
            state.phase = SelectionPhase::UserAdjusted;
        });
    }

    pub fn set_deadline_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.state
            .send_modify(|state| state.selection.deadline_input = input);
    }

    /// Validates the selection, books the cargo, then re-fetches the whole
    /// cargo list.
    pub async fn book_cargo(&self) -> Result<Cargo, BookingError> {
        let request = self.build_request()?;
        let _pending = PendingGuard::enter(&self.state);

        tracing::info!(
            origin = %request.origin,
            destination = %request.destination,
            arrival_deadline = request.arrival_deadline,
            "booking cargo"
        );
        if request.origin == request.destination {
            tracing::warn!(locode = %request.origin, "origin and destination are the same");
        }

        let booked = self
            .cargos
            .create(&request)
            .await
            .map_err(BookingError::Create)?;

        tracing::info!(tracking_id = %booked.tracking_id, "cargo booked");
        self.state
            .send_modify(|state| state.last_booked = Some(booked.clone()));

        self.cargo_list
            .refresh()
            .await
            .map_err(|source| BookingError::Refresh {
                tracking_id: booked.tracking_id.clone(),
                source,
            })?;

        Ok(booked)
    }

    fn build_request(&self) -> Result<BookingRequest, ValidationError> {
        let selection = self.selection();
        let origin = selection.origin.ok_or(ValidationError::MissingOrigin)?;
        let destination = selection
            .destination
            .ok_or(ValidationError::MissingDestination)?;
        let deadline = parse_deadline(&selection.deadline_input)?;
        Ok(BookingRequest::new(origin, destination, deadline))
    }
}

struct PendingGuard<'a>(&'a watch::Sender<BookingState>);

impl<'a> PendingGuard<'a> {
    fn enter(state: &'a watch::Sender<BookingState>) -> Self {
        state.send_modify(|state| state.pending += 1);
        Self(state)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0
            .send_modify(|state| state.pending = state.pending.saturating_sub(1));
    }
}
