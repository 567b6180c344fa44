//! Retry classification and exponential backoff.
//!
//! Every attempt of a call ends as an [`AttemptOutcome`]. The
//! [`RetryPolicy`] decides which failures are transient and how long to
//! wait before the next attempt.
//!
//! # Classification
//!
//! | Failure | Retryable |
//! |---------|-----------|
//! | No response (connect, DNS, timeout) | yes |
//! | Body is not the API error envelope (HTML, empty, non-JSON) | yes, whatever the status |
//! | Status 500..=599 | yes |
//! | Status 429 | yes |
//! | Any other status with an error envelope | no |
//!
//! # Backoff schedule (example with `base_delay = 1s`)
//!
//! | Retry index | Sleep before next attempt |
//! |-------------|---------------------------|
//! | 0 | 1 × 2^0 = 1 s |
//! | 1 | 1 × 2^1 = 2 s |
//! | 2 | 1 × 2^2 = 4 s |
//! | 3 | 1 × 2^3 = 8 s |

use std::time::Duration;

use crate::clients::errors::{ApiErrorPayload, TransportError};
use crate::clients::http_response::HttpResponse;
use crate::config::YookassaConfig;

/// Characters of a non-envelope body kept for diagnostics.
const BODY_SNIPPET_CHARS: usize = 200;

/// Why a single attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// No HTTP response was obtained.
    Transport(TransportError),
    /// A response arrived but was not a usable success.
    Response {
        /// The HTTP status code.
        status: u16,
        /// The error envelope, when the body was one.
        payload: Option<ApiErrorPayload>,
        /// The start of the raw body, for diagnostics.
        body_snippet: String,
    },
}

impl AttemptFailure {
    /// Returns the HTTP status, if a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Response { status, .. } => Some(*status),
        }
    }

    /// Returns the structured error envelope, if the body was one.
    #[must_use]
    pub const fn payload(&self) -> Option<&ApiErrorPayload> {
        match self {
            Self::Transport(_) => None,
            Self::Response { payload, .. } => payload.as_ref(),
        }
    }
}

/// The result of one physical attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// A 2xx response with a JSON body.
    Success {
        /// The HTTP status code.
        status: u16,
        /// The parsed body.
        body: serde_json::Value,
    },
    /// A failure worth another attempt.
    RetryableFailure(AttemptFailure),
    /// A failure that another attempt will not fix.
    TerminalFailure(AttemptFailure),
}

/// Decides whether failures are retried and how long to wait between attempts.
///
/// # Example
///
/// ```rust
/// use yookassa_api::clients::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(Duration::from_millis(1000));
/// assert_eq!(policy.backoff_delay(0), Duration::from_millis(1000));
/// assert_eq!(policy.backoff_delay(3), Duration::from_millis(8000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    base_delay: Duration,
    max_delay: Option<Duration>,
}

impl RetryPolicy {
    /// Creates an uncapped policy with the given base delay.
    #[must_use]
    pub const fn new(base_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay: None,
        }
    }

    /// Caps every computed delay at `max_delay`.
    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Builds the policy from the client configuration.
    #[must_use]
    pub const fn from_config(config: &YookassaConfig) -> Self {
        Self {
            base_delay: config.retry_base_delay(),
            max_delay: config.max_retry_delay(),
        }
    }

    /// Returns the base delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns `true` if the failure is transient.
    #[must_use]
    pub const fn is_retryable(&self, failure: &AttemptFailure) -> bool {
        match failure {
            AttemptFailure::Transport(_) | AttemptFailure::Response { payload: None, .. } => true,
            AttemptFailure::Response { status, .. } => Self::is_retryable_status(*status),
        }
    }

    /// Returns `true` for 429 and every 5xx status.
    #[must_use]
    pub const fn is_retryable_status(status: u16) -> bool {
        status == 429 || (status >= 500 && status < 600)
    }

    /// Returns the wait before the retry with the given index (0 for the first retry).
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        let delay = self.base_delay.checked_mul(factor).unwrap_or(Duration::MAX);
        self.max_delay.map_or(delay, |max| delay.min(max))
    }

    /// Turns the result of one round trip into an [`AttemptOutcome`].
    #[must_use]
    pub fn classify(&self, result: Result<HttpResponse, TransportError>) -> AttemptOutcome {
        let failure = match result {
            Err(error) => AttemptFailure::Transport(error),
            Ok(response) if response.is_ok() => match response.json_body() {
                Ok(body) => {
                    return AttemptOutcome::Success {
                        status: response.code,
                        body,
                    }
                }
                Err(_) => AttemptFailure::Response {
                    status: response.code,
                    payload: None,
                    body_snippet: response.body_snippet(BODY_SNIPPET_CHARS),
                },
            },
            Ok(response) => AttemptFailure::Response {
                status: response.code,
                payload: ApiErrorPayload::parse(&response.body),
                body_snippet: response.body_snippet(BODY_SNIPPET_CHARS),
            },
        };

        if self.is_retryable(&failure) {
            AttemptOutcome::RetryableFailure(failure)
        } else {
            AttemptOutcome::TerminalFailure(failure)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RETRY_BASE_DELAY)
    }
}
