//! HTTP-backed endpoints

use super::registry::{Endpoint, EndpointRegistry};
use super::{READ_ENDPOINTS, WRITE_ENDPOINTS};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{JsonValue, Params};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// An endpoint bound to one resource path on a shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Arc<HttpClient>,
    method: Method,
    path: String,
}

impl HttpEndpoint {
    /// Create a new endpoint
    pub fn new(client: Arc<HttpClient>, method: Method, path: impl Into<String>) -> Self {
        Self {
            client,
            method,
            path: path.into(),
        }
    }

    /// Resource path this endpoint calls
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method this endpoint uses
    pub fn method(&self) -> &Method {
        &self.method
    }
}

#[async_trait]
impl Endpoint for HttpEndpoint {
    async fn call(&self, params: &Params) -> Result<JsonValue> {
        self.client
            .send(self.method.clone(), &self.path, params)
            .await
    }
}

impl EndpointRegistry {
    /// Registry of every REST endpoint the client uses, bound to `client`
    pub fn twitter(client: Arc<HttpClient>) -> Self {
        let mut builder = Self::builder();
        for id in READ_ENDPOINTS {
            builder = builder.register(id, HttpEndpoint::new(client.clone(), Method::GET, id));
        }
        for id in WRITE_ENDPOINTS {
            builder = builder.register(id, HttpEndpoint::new(client.clone(), Method::POST, id));
        }
        builder.build()
    }
}
