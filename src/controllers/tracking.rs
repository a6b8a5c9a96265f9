use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::Cargo;
use crate::infra::{ResourceClient, ResourceError};

/// Which response wins when lookups overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Responses to anything but the most recent lookup are dropped.
    #[default]
    LatestRequest,
    /// Whatever completes last is shown, even if it was asked for first.
    LatestCompletion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    Cleared,
    Displayed,
    /// A newer lookup was issued while this one was in flight.
    Superseded,
}

/// Resolves one cargo by tracking id for display.
#[derive(Clone)]
pub struct TrackingQueryController<R> {
    cargos: R,
    ordering: ResponseOrdering,
    issued: Arc<AtomicU64>,
    displayed: Arc<watch::Sender<Option<Cargo>>>,
}

impl<R> TrackingQueryController<R>
where
    R: ResourceClient<Entity = Cargo>,
{
    pub fn new(cargos: R) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            cargos,
            ordering: ResponseOrdering::default(),
            issued: Arc::new(AtomicU64::new(0)),
            displayed: Arc::new(tx),
        }
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn displayed(&self) -> Option<Cargo> {
        self.displayed.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Cargo>> {
        self.displayed.subscribe()
    }

    /// Looks up `query`, or clears the display when it is empty.
    ///
    /// A failed lookup leaves the current display untouched.
    pub async fn show_cargo(&self, query: Option<&str>) -> Result<QueryOutcome, ResourceError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(id) = query.filter(|q| !q.is_empty()) else {
            self.displayed.send_replace(None);
            tracing::debug!("tracking display cleared");
            return Ok(QueryOutcome::Cleared);
        };

        let fetched = self.cargos.get(id).await;

        if self.ordering == ResponseOrdering::LatestRequest
            && self.issued.load(Ordering::SeqCst) != ticket
        {
            tracing::debug!(tracking_id = id, failed = fetched.is_err(), "dropping superseded lookup");
            return Ok(QueryOutcome::Superseded);
        }

        let cargo = fetched.inspect_err(|err| {
            tracing::warn!(tracking_id = id, %err, "cargo lookup failed");
        })?;

        tracing::info!(tracking_id = %cargo.tracking_id, status = %cargo.status_text, "showing cargo");
        self.displayed.send_replace(Some(cargo));
        Ok(QueryOutcome::Displayed)
    }
}
