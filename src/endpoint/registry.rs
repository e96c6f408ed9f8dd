//! Endpoint trait and the read-only registry

use crate::error::{Error, Result};
use crate::types::{JsonValue, Params};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// One bound, authenticated remote operation
///
/// Implementations perform exactly one call. Failures carrying an HTTP
/// status must surface as `Error::HttpStatus` so the dispatcher can
/// classify them; anything else is treated as fatal. Request signers
/// built on `anyhow` can use `?` directly, their errors pass through
/// as `Error::Anyhow`.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Invoke the operation with the given parameters
    async fn call(&self, params: &Params) -> Result<JsonValue>;
}

/// Read-only map from endpoint identifier to callable
#[derive(Clone, Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, Arc<dyn Endpoint>>,
}

impl EndpointRegistry {
    /// Create a new registry builder
    pub fn builder() -> EndpointRegistryBuilder {
        EndpointRegistryBuilder::default()
    }

    /// Look up the callable bound to `id`
    pub fn get(&self, id: &str) -> Result<&Arc<dyn Endpoint>> {
        self.endpoints
            .get(id)
            .ok_or_else(|| Error::unknown_endpoint(id))
    }

    /// Check if an identifier is registered
    pub fn contains(&self, id: &str) -> bool {
        self.endpoints.contains_key(id)
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl std::fmt::Debug for EndpointRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointRegistry")
            .field("endpoints", &self.ids())
            .finish()
    }
}

/// Builder for an endpoint registry
#[derive(Default)]
pub struct EndpointRegistryBuilder {
    endpoints: HashMap<String, Arc<dyn Endpoint>>,
}

impl EndpointRegistryBuilder {
    /// Bind an identifier to a callable, replacing any earlier binding
    #[must_use]
    pub fn register(mut self, id: impl Into<String>, endpoint: impl Endpoint + 'static) -> Self {
        self.endpoints.insert(id.into(), Arc::new(endpoint));
        self
    }

    /// Bind an identifier to a shared callable
    #[must_use]
    pub fn register_arc(mut self, id: impl Into<String>, endpoint: Arc<dyn Endpoint>) -> Self {
        self.endpoints.insert(id.into(), endpoint);
        self
    }

    /// Freeze the registry
    pub fn build(self) -> EndpointRegistry {
        EndpointRegistry {
            endpoints: self.endpoints,
        }
    }
}
