//! The normalized outcome of one logical API call.

use serde_json::Value;

use crate::clients::errors::{ApiError, ApiErrorPayload, ErrorKind};
use crate::clients::http_request::IdempotencyKey;

/// The only shape the request pipeline ever returns.
///
/// Exactly one branch is populated, and both carry the idempotency key that
/// was sent with every attempt of the call.
///
/// # Example
///
/// ```rust
/// use yookassa_api::clients::{ApiResult, IdempotencyKey};
/// use serde_json::json;
///
/// let result = ApiResult::Ok {
///     data: json!({"id": "p1"}),
///     request_id: IdempotencyKey::new("k1").unwrap(),
/// };
///
/// assert!(result.is_ok());
/// assert_eq!(result.request_id().as_ref(), "k1");
/// assert_eq!(result.into_result().unwrap()["id"], "p1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// The call succeeded.
    Ok {
        /// The response payload.
        data: Value,
        /// The idempotency key of the call.
        request_id: IdempotencyKey,
    },
    /// The call failed.
    Err {
        /// The error envelope, received or synthesized.
        error: ApiErrorPayload,
        /// Where the error came from.
        kind: ErrorKind,
        /// The idempotency key of the call.
        request_id: IdempotencyKey,
    },
}

impl ApiResult {
    /// Returns the idempotency key used for the call.
    #[must_use]
    pub const fn request_id(&self) -> &IdempotencyKey {
        match self {
            Self::Ok { request_id, .. } | Self::Err { request_id, .. } => request_id,
        }
    }

    /// Returns `true` for the success branch.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns the error envelope of a failed call.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiErrorPayload> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { error, .. } => Some(error),
        }
    }

    /// Converts into a `Result`, raising an [`ApiError`] for the failure branch.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] carrying code, description, correlation id and
    /// idempotency key when the call failed.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Self::Ok { data, .. } => Ok(data),
            Self::Err {
                error,
                kind,
                request_id,
            } => Err(ApiError::from_payload(error, kind, request_id)),
        }
    }

    /// Renders the client-facing JSON shape.
    ///
    /// Success yields the raw payload; failure yields the error envelope
    /// with an added `idempotence_key` field.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Ok { data, .. } => data.clone(),
            Self::Err {
                error, request_id, ..
            } => {
                let mut value = serde_json::to_value(error).unwrap_or_else(|_| Value::Null);
                if let Value::Object(map) = &mut value {
                    map.insert(
                        "idempotence_key".to_string(),
                        Value::String(request_id.to_string()),
                    );
                }
                value
            }
        }
    }
}
