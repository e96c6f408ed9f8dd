//! HTTP client module
//!
//! Provides the transport used by [`crate::endpoint::HttpEndpoint`].
//!
//! # Features
//!
//! - **Base URL joining**: resource paths become `{base}/{path}.json`
//! - **Authentication**: integration with the auth module
//! - **Status mapping**: non-2xx responses surface as `Error::HttpStatus`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
