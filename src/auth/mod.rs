//! Authentication module
//!
//! Supports: Bearer, Basic, Custom Headers
//!
//! The `Authenticator` decorates each request built by the HTTP client.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
