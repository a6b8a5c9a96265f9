//! Binding from a named REST collection to typed async calls.
//!
//! - `get` / `list` / `create` map onto `GET {collection}/{id}`,
//!   `GET {collection}` and `POST {collection}`.
//! - Every call resolves to a `Result`; nothing is retried or cached.

use std::marker::PhantomData;

use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

const USER_AGENT: &str = concat!("cargo-tracker/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("{0} cannot be used as a base URL")]
    NotBaseUrl(String),
    #[error("{collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{collection} responded with {status}: {message}")]
    Status {
        collection: String,
        status: u16,
        message: String,
    },
}

/// Coarse classification for presenting failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Transport,
}

impl ResourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ResourceError::NotFound { .. } => FailureKind::NotFound,
            ResourceError::Status { status, .. } if *status == StatusCode::NOT_FOUND.as_u16() => {
                FailureKind::NotFound
            }
            _ => FailureKind::Transport,
        }
    }
}

/// Access point for one REST collection.
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    type Entity;

    /// Collection name, e.g. `cargos`.
    fn collection(&self) -> &str;

    async fn get(&self, id: &str) -> Result<Self::Entity, ResourceError>;

    async fn list(&self) -> Result<Vec<Self::Entity>, ResourceError>;

    async fn create<P>(&self, payload: &P) -> Result<Self::Entity, ResourceError>
    where
        P: Serialize + ?Sized;
}

/// [`ResourceClient`] over HTTP with JSON bodies.
pub struct HttpResource<T> {
    http: Client,
    name: String,
    collection_url: Url,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpResource<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            name: self.name.clone(),
            collection_url: self.collection_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> HttpResource<T> {
    /// `base` must end with `/` for the collection to be appended rather than
    /// replace the last path segment.
    pub fn new(http: Client, base: &Url, collection: &str) -> Result<Self, ResourceError> {
        let collection_url = base.join(collection)?;
        if collection_url.cannot_be_a_base() {
            return Err(ResourceError::NotBaseUrl(base.to_string()));
        }
        Ok(Self {
            http,
            name: collection.to_string(),
            collection_url,
            _entity: PhantomData,
        })
    }

    /// `.` and `..` collapse during URL parsing, in percent-encoded form too,
    /// so no entity URL can carry them.
    fn entity_url(&self, id: &str) -> Result<Url, ResourceError> {
        if matches!(id, "." | "..") {
            return Err(ResourceError::NotFound {
                collection: self.name.clone(),
                id: id.to_string(),
            });
        }
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResourceError::NotBaseUrl(self.collection_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn read<R>(&self, response: reqwest::Response, id: Option<&str>) -> Result<R, ResourceError>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(ResourceError::NotFound {
                collection: self.name.clone(),
                id: id.to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(ResourceError::Status {
            collection: self.name.clone(),
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            }),
        })
    }
}

/// Builds the HTTP client shared by every resource.
pub fn http_client() -> Result<Client, ResourceError> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

impl<T> ResourceClient for HttpResource<T>
where
    T: DeserializeOwned,
{
    type Entity = T;

    fn collection(&self) -> &str {
        &self.name
    }

    async fn get(&self, id: &str) -> Result<T, ResourceError> {
        let url = self.entity_url(id)?;
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        self.read(response, Some(id)).await
    }

    async fn list(&self) -> Result<Vec<T>, ResourceError> {
        tracing::debug!(url = %self.collection_url, "GET");
        let response = self.http.get(self.collection_url.clone()).send().await?;
        self.read(response, None).await
    }

    async fn create<P>(&self, payload: &P) -> Result<T, ResourceError>
    where
        P: Serialize + ?Sized,
    {
        tracing::debug!(url = %self.collection_url, "POST");
        let response = self
            .http
            .post(self.collection_url.clone())
            .json(payload)
            .send()
            .await?;
        self.read(response, None).await
    }
}

/// Registry errors look like `{"error": "resource not found"}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode as AxumStatus,
        routing::get,
        Json, Router,
    };
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::{BookingRequest, Cargo, Location};

    type Registry = Arc<Mutex<Vec<Value>>>;

    async fn list_cargos(State(registry): State<Registry>) -> Json<Vec<Value>> {
        Json(registry.lock().clone())
    }

    async fn get_cargo(
        State(registry): State<Registry>,
        Path(id): Path<String>,
    ) -> Result<Json<Value>, (AxumStatus, Json<Value>)> {
        registry
            .lock()
            .iter()
            .find(|cargo| cargo["trackingId"] == id.as_str())
            .cloned()
            .map(Json)
            .ok_or((
                AxumStatus::NOT_FOUND,
                Json(json!({"error": "resource not found"})),
            ))
    }

    async fn book_cargo(
        State(registry): State<Registry>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, (AxumStatus, Json<Value>)> {
        if body["origin"] == body["destination"] {
            return Err((AxumStatus::BAD_REQUEST, Json(json!({"error": "invalid input"}))));
        }
        let cargo = json!({
            "trackingId": "NEW001",
            "origin": body["origin"],
            "destination": body["destination"],
            "arrivalDeadline": "2024-03-12T00:00:00Z",
            "misrouted": false,
        });
        registry.lock().push(cargo.clone());
        Ok(Json(cargo))
    }

    async fn list_locations() -> Json<Value> {
        Json(json!([
            {"locode": "AUMEL", "name": "Melbourne"},
            {"locode": "SESTO", "name": "Stockholm"},
        ]))
    }

    async fn serve() -> Url {
        let registry: Registry = Arc::new(Mutex::new(vec![json!({
            "trackingId": "ABC123",
            "origin": "SESTO",
            "destination": "CNHKG",
            "statusText": "Not received",
        })]));
        let app = Router::new()
            .route("/api/cargos", get(list_cargos).post(book_cargo))
            .route("/api/cargos/{id}", get(get_cargo))
            .route("/api/locations", get(list_locations))
            .with_state(registry);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/api/")).unwrap()
    }

    fn resources(base: &Url) -> (HttpResource<Cargo>, HttpResource<Location>) {
        let http = http_client().unwrap();
        (
            HttpResource::new(http.clone(), base, "cargos").unwrap(),
            HttpResource::new(http, base, "locations").unwrap(),
        )
    }

    #[test]
    fn builds_entity_urls() {
        let base = Url::parse("http://registry.local/api/").unwrap();
        let cargos: HttpResource<Cargo> =
            HttpResource::new(http_client().unwrap(), &base, "cargos").unwrap();
        assert_eq!(cargos.collection_url.as_str(), "http://registry.local/api/cargos");
        assert_eq!(
            cargos.entity_url("ABC123").unwrap().as_str(),
            "http://registry.local/api/cargos/ABC123"
        );
        assert_eq!(
            cargos.entity_url("a b/c").unwrap().as_str(),
            "http://registry.local/api/cargos/a%20b%2Fc"
        );
        assert_eq!(
            cargos.entity_url("..a").unwrap().as_str(),
            "http://registry.local/api/cargos/..a"
        );
        for id in [".", ".."] {
            assert!(matches!(
                cargos.entity_url(id),
                Err(ResourceError::NotFound { id: ref missing, .. }) if missing == id
            ));
        }
    }

    #[test]
    fn rejects_opaque_base() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(HttpResource::<Cargo>::new(http_client().unwrap(), &base, "cargos").is_err());
    }

    #[test]
    fn extracts_registry_error_message() {
        assert_eq!(
            error_message(r#"{"error": "invalid input"}"#).as_deref(),
            Some("invalid input")
        );
        assert_eq!(error_message("<html>"), None);
    }

    #[tokio::test]
    async fn gets_and_lists_over_http() {
        let base = serve().await;
        let (cargos, locations) = resources(&base);

        let cargo = cargos.get("ABC123").await.unwrap();
        assert_eq!(cargo.destination, "CNHKG");

        let all = cargos.list().await.unwrap();
        assert_eq!(all.len(), 1);

        let places = locations.list().await.unwrap();
        assert_eq!(places[1].display_name, "Stockholm");
        assert_eq!(locations.collection(), "locations");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let base = serve().await;
        let (cargos, _) = resources(&base);

        let err = cargos.get("NOPE").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { ref id, .. } if id == "NOPE"));
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[tokio::test]
    async fn dot_segment_id_never_hits_the_collection() {
        let base = serve().await;
        let (cargos, _) = resources(&base);

        let err = cargos.get("..").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { ref id, .. } if id == ".."));
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[tokio::test]
    async fn create_posts_json_body() {
        let base = serve().await;
        let (cargos, _) = resources(&base);

        let request = BookingRequest {
            origin: "AUMEL".into(),
            destination: "SESTO".into(),
            arrival_deadline: 1_710_201_600_000,
        };
        let booked = cargos.create(&request).await.unwrap();
        assert_eq!(booked.tracking_id, "NEW001");
        assert_eq!(booked.origin, "AUMEL");
        assert_eq!(cargos.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn rejected_booking_carries_server_message() {
        let base = serve().await;
        let (cargos, _) = resources(&base);

        let request = BookingRequest {
            origin: "SESTO".into(),
            destination: "SESTO".into(),
            arrival_deadline: 0,
        };
        match cargos.create(&request).await {
            Err(ResourceError::Status {
                status, message, ..
            }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid input");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_registry_is_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let (cargos, _) = resources(&base);
        let err = cargos.list().await.unwrap_err();
        assert!(matches!(err, ResourceError::Http(_)));
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
