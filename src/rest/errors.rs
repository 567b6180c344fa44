//! Resource-specific error types for REST API operations.
//!
//! Resource wrappers convert the pipeline's [`ApiResult`](crate::clients::ApiResult)
//! into a `Result`, so every failure a caller sees is a [`ResourceError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::rest::{RestResource, ResourceError};
//! use yookassa_api::rest::resources::Payment;
//!
//! match Payment::info(&client, &payment_id).await {
//!     Ok(payment) => println!("status: {}", payment.status),
//!     Err(ResourceError::Api(e)) => {
//!         println!("{} ({}), idempotence key {}", e.code, e.description, e.idempotency_key);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{ApiError, InvalidRequestError};

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The API call failed.
    ///
    /// Carries the error envelope (received or synthesized) together with
    /// the idempotency key of the call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// Request parameters could not be serialized.
    #[error("Failed to serialize {resource} parameters: {source}")]
    Serialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The response payload did not match the resource model.
    #[error("Failed to deserialize {resource} response: {source}")]
    Deserialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The resource declares no path for the operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "info", "capture").
        operation: &'static str,
    },
}

impl ResourceError {
    /// Returns the API error, if the call reached the pipeline and failed.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the idempotency key of the failed call, if one was assigned.
    #[must_use]
    pub fn idempotency_key(&self) -> Option<&str> {
        self.api_error().map(|e| e.idempotency_key.as_ref())
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
