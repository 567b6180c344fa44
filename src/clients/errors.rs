//! Error types for the YooKassa API SDK HTTP layer.
//!
//! # Error Handling
//!
//! The SDK separates expected API failures from programmer errors:
//!
//! - [`ApiErrorPayload`]: The API's own error envelope, or a synthesized one
//! - [`ApiError`]: The caller-visible error raised by resource methods
//! - [`TransportError`]: A round trip that produced no usable response
//! - [`InvalidRequestError`]: A request descriptor that fails validation
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::clients::{ApiResult, ErrorKind};
//!
//! match client.execute(descriptor).await {
//!     ApiResult::Ok { data, .. } => println!("Payment: {data}"),
//!     ApiResult::Err { error, kind: ErrorKind::Api, .. } => {
//!         println!("Rejected: {} {}", error.code, error.description);
//!     }
//!     ApiResult::Err { error, .. } => println!("Failed: {}", error.code),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::http_request::IdempotencyKey;

/// Code used when every attempt failed and nothing more specific is known.
pub const RETRY_EXHAUSTED_CODE: &str = "RETRY_EXHAUSTED";

/// Code used when a call is cancelled through its cancellation token.
pub const CANCELLED_CODE: &str = "request_cancelled";

/// The value of the `type` field in every error envelope.
const ERROR_TYPE: &str = "error";

/// The error envelope returned by the API.
///
/// ```json
/// { "type": "error", "id": "...", "code": "invalid_request", "description": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    /// Always `"error"`.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Correlation id of the error.
    pub id: String,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// The request parameter the error refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ApiErrorPayload {
    /// Creates an envelope for a failure the SDK synthesized itself.
    #[must_use]
    pub fn synthetic(
        id: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            error_type: ERROR_TYPE.to_string(),
            id: id.into(),
            code: code.into(),
            description: description.into(),
            parameter: None,
        }
    }

    /// Parses a response body as the API's error envelope.
    ///
    /// Returns `None` unless the body is JSON with `type == "error"` and a
    /// non-empty `code`. HTML error pages and empty bodies yield `None`.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let payload: Self = serde_json::from_str(body).ok()?;
        (payload.error_type == ERROR_TYPE && !payload.code.is_empty()).then_some(payload)
    }
}

/// Where a failed call's error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API returned its own error envelope.
    Api,
    /// Synthesized from an HTTP status without a usable envelope.
    Http,
    /// Synthesized from a transport failure.
    Network,
    /// Every attempt failed and no diagnostic context was available.
    RetryExhausted,
    /// The call was cancelled by the caller.
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Http => write!(f, "http"),
            Self::Network => write!(f, "network"),
            Self::RetryExhausted => write!(f, "retry_exhausted"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The error raised by resource methods when a call fails.
///
/// Carries the envelope's code, description and correlation id together
/// with the idempotency key of the failed call.
///
/// # Example
///
/// ```rust
/// use yookassa_api::clients::{ApiError, ErrorKind, IdempotencyKey};
///
/// let error = ApiError {
///     kind: ErrorKind::Api,
///     code: "invalid_request".to_string(),
///     description: "Amount is missing".to_string(),
///     id: "ab12".to_string(),
///     parameter: Some("amount".to_string()),
///     idempotency_key: IdempotencyKey::new("key-1").unwrap(),
/// };
///
/// assert!(error.to_string().contains("invalid_request"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {description} (id: {id}, idempotence key: {idempotency_key})")]
pub struct ApiError {
    /// Where the error came from.
    pub kind: ErrorKind,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Correlation id of the error.
    pub id: String,
    /// The request parameter the error refers to, if any.
    pub parameter: Option<String>,
    /// The idempotency key of the failed call.
    pub idempotency_key: IdempotencyKey,
}

impl ApiError {
    /// Builds the caller-visible error from a failed call's envelope.
    #[must_use]
    pub fn from_payload(
        payload: ApiErrorPayload,
        kind: ErrorKind,
        idempotency_key: IdempotencyKey,
    ) -> Self {
        Self {
            kind,
            code: payload.code,
            description: payload.description,
            id: payload.id,
            parameter: payload.parameter,
            idempotency_key,
        }
    }
}

/// Error returned when a request descriptor fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A body was provided for a method that does not carry one.
    #[error("Cannot send a body with {method} requests.")]
    BodyNotAllowed {
        /// The HTTP method of the request.
        method: String,
    },

    /// A `{placeholder}` in the path template was not given a value.
    #[error("Missing value for path parameter '{name}'.")]
    MissingPathParam {
        /// The unresolved placeholder name.
        name: String,
    },

    /// A path parameter value was empty.
    #[error("Path parameter '{name}' cannot be empty.")]
    EmptyPathParam {
        /// The placeholder name.
        name: String,
    },

    /// A caller-supplied idempotency key was empty.
    #[error("Idempotency key cannot be empty.")]
    EmptyIdempotencyKey,
}

/// Classification of a failed round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The attempt exceeded its timeout.
    Timeout,
    /// The connection could not be established (DNS, refused, TLS).
    Connect,
    /// The request failed while being sent.
    Request,
    /// The response body could not be read.
    Body,
    /// Any other failure.
    Other,
}

/// A round trip that produced no usable HTTP response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind:?} error: {message}")]
pub struct TransportError {
    /// The failure class.
    pub kind: TransportErrorKind,
    /// Diagnostic message from the HTTP library.
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the synthetic error code for this failure, if it has one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self.kind {
            TransportErrorKind::Timeout => Some("request_timeout"),
            TransportErrorKind::Connect => Some("connection_error"),
            TransportErrorKind::Request | TransportErrorKind::Body => Some("network_error"),
            TransportErrorKind::Other => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else if error.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, error.to_string())
    }
}
