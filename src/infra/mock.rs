//! In-memory [`ResourceClient`] double for controller tests.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Notify;

use super::resource::{ResourceClient, ResourceError};
use crate::domain::{Cargo, Location};

pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Cargo {
    fn key(&self) -> &str {
        &self.tracking_id
    }
}

impl Keyed for Location {
    fn key(&self) -> &str {
        &self.locode
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Get(String),
    List,
    Create(Value),
}

struct MockState<T> {
    collection: &'static str,
    entities: Mutex<Vec<T>>,
    created: Mutex<Option<T>>,
    calls: Mutex<Vec<Call>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    failure: Mutex<Option<u16>>,
    list_failure: Mutex<Option<u16>>,
}

/// Serves a fixed collection. `create` answers with the entity queued via
/// [`MockResource::respond_to_create`] and appends it to the collection.
pub struct MockResource<T> {
    state: Arc<MockState<T>>,
}

impl<T> Clone for MockResource<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Keyed> MockResource<T> {
    pub fn new(collection: &'static str, entities: Vec<T>) -> Self {
        Self {
            state: Arc::new(MockState {
                collection,
                entities: Mutex::new(entities),
                created: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
                gates: Mutex::new(HashMap::new()),
                failure: Mutex::new(None),
                list_failure: Mutex::new(None),
            }),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().clone()
    }

    pub fn replace_all(&self, entities: Vec<T>) {
        *self.state.entities.lock() = entities;
    }

    pub fn respond_to_create(&self, entity: T) {
        *self.state.created.lock() = Some(entity);
    }

    /// Every call fails with `status` until [`MockResource::recover`].
    pub fn fail_with(&self, status: u16) {
        *self.state.failure.lock() = Some(status);
    }

    /// Only `list` fails with `status`.
    pub fn fail_list_with(&self, status: u16) {
        *self.state.list_failure.lock() = Some(status);
    }

    pub fn recover(&self) {
        *self.state.failure.lock() = None;
        *self.state.list_failure.lock() = None;
    }

    /// Holds `get(id)` until the returned handle is notified.
    pub fn gate(&self, id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.state
            .gates
            .lock()
            .insert(id.to_string(), Arc::clone(&notify));
        notify
    }

    fn record(&self, call: Call) {
        self.state.calls.lock().push(call);
    }

    fn check_failure(&self) -> Result<(), ResourceError> {
        self.fail_if(*self.state.failure.lock())
    }

    fn fail_if(&self, status: Option<u16>) -> Result<(), ResourceError> {
        match status {
            Some(status) => Err(ResourceError::Status {
                collection: self.state.collection.to_string(),
                status,
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<T: Clone + Keyed> ResourceClient for MockResource<T> {
    type Entity = T;

    fn collection(&self) -> &str {
        self.state.collection
    }

    async fn get(&self, id: &str) -> Result<T, ResourceError> {
        self.record(Call::Get(id.to_string()));
        let gate = self.state.gates.lock().get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check_failure()?;
        self.state
            .entities
            .lock()
            .iter()
            .find(|entity| entity.key() == id)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                collection: self.state.collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<T>, ResourceError> {
        self.record(Call::List);
        self.check_failure()?;
        self.fail_if(*self.state.list_failure.lock())?;
        Ok(self.state.entities.lock().clone())
    }

    async fn create<P>(&self, payload: &P) -> Result<T, ResourceError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload).unwrap_or(Value::Null);
        self.record(Call::Create(body));
        self.check_failure()?;
        let created = self
            .state
            .created
            .lock()
            .clone()
            .ok_or_else(|| ResourceError::Status {
                collection: self.state.collection.to_string(),
                status: 500,
                message: "no create response queued".to_string(),
            })?;
        self.state.entities.lock().push(created.clone());
        Ok(created)
    }
}

pub fn cargo(tracking_id: &str) -> Cargo {
    Cargo {
        tracking_id: tracking_id.to_string(),
        origin: String::new(),
        destination: String::new(),
        arrival_deadline: None,
        status_text: String::new(),
        eta: None,
        next_expected_activity: String::new(),
        events: Vec::new(),
        misrouted: None,
        routed: None,
        legs: Vec::new(),
    }
}

pub fn location(locode: &str, name: &str) -> Location {
    Location {
        locode: locode.to_string(),
        display_name: name.to_string(),
    }
}
