//! Request dispatch with failure classification and retry
//!
//! The [`Dispatcher`] is the single place where a failed call is classified
//! and where the crate waits:
//!
//! | Status | Policy |
//! |---|---|
//! | 401, 403, 404 | no data, never retried |
//! | 429 | fixed cooldown, backoff reset, retry |
//! | 500, 502, 503, 504 | exponential backoff until the ceiling, then fatal |
//! | anything else | fatal |

mod dispatcher;
mod policy;
mod sleeper;

pub use dispatcher::{Dispatcher, RetryMode};
pub use policy::{status_reason, Backoff, FailureClass, RetryPolicy};
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
