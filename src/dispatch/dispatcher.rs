//! The dispatcher retry loop

use super::policy::{status_reason, Backoff, FailureClass, RetryPolicy};
use super::sleeper::{Sleeper, TokioSleeper};
use crate::endpoint::EndpointRegistry;
use crate::error::Result;
use crate::types::{JsonValue, Params};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Whether a call may wait and retry after a recoverable failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryMode {
    /// Wait out quota and transient failures
    #[default]
    Enabled,
    /// Give up on the first failure
    Disabled,
}

/// Issues logical requests against the endpoint registry
///
/// Backoff state lives on the stack of each `dispatch` call, so one
/// dispatcher can serve any number of sequential or concurrent calls.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<EndpointRegistry>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Dispatcher {
    /// Create a dispatcher with the default retry policy and tokio timer
    pub fn new(registry: Arc<EndpointRegistry>) -> Self {
        Self {
            registry,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the retry policy
    ///
    /// Fails with a configuration error when a timing is negative,
    /// non-finite or out of order.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Replace the sleeper
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// The endpoint registry
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// The retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Call `endpoint` with retries enabled
    ///
    /// `Ok(None)` means the server reported the data as unavailable.
    pub async fn dispatch(&self, endpoint: &str, params: &Params) -> Result<Option<JsonValue>> {
        self.dispatch_with(endpoint, params, RetryMode::Enabled)
            .await
    }

    /// Call `endpoint`, choosing whether recoverable failures are retried
    pub async fn dispatch_with(
        &self,
        endpoint: &str,
        params: &Params,
        retry: RetryMode,
    ) -> Result<Option<JsonValue>> {
        let callable = self.registry.get(endpoint)?;
        let mut backoff = Backoff::new(&self.policy);

        loop {
            let err = match callable.call(params).await {
                Ok(payload) => {
                    debug!(endpoint, "request succeeded");
                    return Ok(Some(payload));
                }
                Err(e) => e,
            };

            let Some(status) = err.status() else {
                return Err(err);
            };

            warn!(
                endpoint,
                status,
                "Error {} ({}) on \"{}\"",
                status,
                status_reason(status),
                endpoint
            );

            match FailureClass::from_status(status) {
                FailureClass::Unavailable => return Ok(None),

                FailureClass::QuotaExceeded => {
                    if retry == RetryMode::Disabled {
                        return Ok(None);
                    }
                    let cooldown = self.policy.cooldown();
                    info!(endpoint, "Retrying in {:?}", cooldown);
                    self.sleeper.sleep(cooldown).await;
                    backoff.reset(&self.policy);
                }

                FailureClass::Transient => {
                    if retry == RetryMode::Enabled {
                        let wait = backoff.current();
                        info!(endpoint, "Retrying in {:?}", wait);
                        self.sleeper.sleep(wait).await;
                        if backoff.grow(&self.policy) {
                            continue;
                        }
                    }
                    error!(endpoint, status, "Too many retries, giving up");
                    return Err(err);
                }

                FailureClass::Fatal => return Err(err),
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
