//! HTTP client types for YooKassa API communication.
//!
//! This module provides the request pipeline every API call flows through.
//! It handles authentication, idempotency keys, client-side rate limiting,
//! retries with exponential backoff and the normalization of outcomes.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async client executing API calls
//! - [`RequestDescriptor`]: What to call (method, path template, parameters, body)
//! - [`ApiResult`]: The normalized outcome of a call
//! - [`Transport`]: One HTTP round trip; [`ReqwestTransport`] is the default
//! - [`RateLimiter`]: The requests-per-second ceiling shared by a client
//! - [`RetryPolicy`]: Retry classification and backoff schedule
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::{YookassaConfig, ShopId, SecretKey};
//! use yookassa_api::clients::{HttpClient, HttpMethod, RequestDescriptor};
//! use serde_json::json;
//!
//! let config = YookassaConfig::builder()
//!     .shop_id(ShopId::new("123456").unwrap())
//!     .secret_key(SecretKey::new("test_secret").unwrap())
//!     .build()
//!     .unwrap();
//! let client = HttpClient::new(&config)?;
//!
//! let descriptor = RequestDescriptor::builder(HttpMethod::Post, "/payments")
//!     .body(json!({"amount": {"value": "100.00", "currency": "RUB"}}))
//!     .build()?;
//!
//! match client.execute(descriptor).await.into_result() {
//!     Ok(payment) => println!("created {}", payment["id"]),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! # Retry Behavior
//!
//! Each call makes at most `retries + 1` attempts, all sharing one
//! idempotency key:
//!
//! - **No response** (connect failure, DNS, timeout): retried
//! - **Body is not an error envelope**: retried, whatever the status
//! - **429 and 5xx**: retried
//! - **Other 4xx with an error envelope**: returned immediately
//!
//! The wait before retry `i` is `retry_base_delay × 2^i`.

mod api_result;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod rate_limiter;
mod retry;
mod transport;

pub use api_result::ApiResult;
pub use errors::{
    ApiError, ApiErrorPayload, ErrorKind, InvalidRequestError, TransportError,
    TransportErrorKind, CANCELLED_CODE, RETRY_EXHAUSTED_CODE,
};
pub use http_client::HttpClient;
pub use http_request::{HttpMethod, IdempotencyKey, RequestDescriptor, RequestDescriptorBuilder};
pub use http_response::HttpResponse;
pub use rate_limiter::RateLimiter;
pub use retry::{AttemptFailure, AttemptOutcome, RetryPolicy};
pub use transport::{
    ReqwestTransport, Transport, TransportRequest, IDEMPOTENCE_KEY_HEADER, SDK_VERSION,
};
