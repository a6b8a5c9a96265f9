use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Cargo;
use crate::infra::{ResourceClient, ResourceError};

/// Shared holder for the displayed cargo list.
///
/// Every refresh replaces the whole sequence; subscribers see the latest
/// replacement only.
#[derive(Clone)]
pub struct CargoListStore {
    tx: Arc<watch::Sender<Vec<Cargo>>>,
}

impl Default for CargoListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CargoListStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> Vec<Cargo> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Cargo>> {
        self.tx.subscribe()
    }

    pub fn same_store(&self, other: &CargoListStore) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }

    fn replace(&self, cargos: Vec<Cargo>) {
        self.tx.send_replace(cargos);
    }
}

/// Loads the full cargo collection into a [`CargoListStore`].
#[derive(Clone)]
pub struct CargoListController<R> {
    cargos: R,
    store: CargoListStore,
}

impl<R> CargoListController<R>
where
    R: ResourceClient<Entity = Cargo>,
{
    pub fn new(cargos: R, store: CargoListStore) -> Self {
        Self { cargos, store }
    }

    pub fn store(&self) -> &CargoListStore {
        &self.store
    }

    /// Re-fetches the collection and stores it in server order.
    ///
    /// On failure the previous list stays in place.
    pub async fn refresh(&self) -> Result<usize, ResourceError> {
        match self.cargos.list().await {
            Ok(cargos) => {
                let count = cargos.len();
                self.store.replace(cargos);
                tracing::info!(count, collection = self.cargos.collection(), "cargo list refreshed");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(%err, "cargo list refresh failed");
                Err(err)
            }
        }
    }
}
