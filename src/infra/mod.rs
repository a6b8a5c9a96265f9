//! Remote registry access.

#[cfg(test)]
pub mod mock;
pub mod resource;

pub use resource::{http_client, FailureKind, HttpResource, ResourceClient, ResourceError};
