//! HTTP client for YooKassa API communication.
//!
//! This module provides the [`HttpClient`] type, the single chokepoint every
//! API call flows through. For each logical call it:
//!
//! 1. fixes one idempotency key (caller-supplied or freshly generated),
//! 2. runs attempts `0..=retries`, each admitted by the shared
//!    [`RateLimiter`] and executed by the [`Transport`],
//! 3. retries transient failures after an exponential backoff,
//! 4. normalizes whatever happened into an [`ApiResult`].

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::clients::api_result::ApiResult;
use crate::clients::errors::{
    ApiErrorPayload, ErrorKind, CANCELLED_CODE, RETRY_EXHAUSTED_CODE,
};
use crate::clients::http_request::{IdempotencyKey, RequestDescriptor};
use crate::clients::rate_limiter::RateLimiter;
use crate::clients::retry::{AttemptFailure, AttemptOutcome, RetryPolicy};
use crate::clients::transport::{
    ReqwestTransport, Transport, TransportRequest, IDEMPOTENCE_KEY_HEADER,
};
use crate::config::{Endpoint, ShopId, YookassaConfig};
use crate::error::ConfigError;

/// HTTP client executing YooKassa API calls.
///
/// The client handles:
/// - Idempotency keys shared by every attempt of a call
/// - Client-side rate limiting at `max_rps`
/// - Retries with exponential backoff for transport failures, 5xx and 429
/// - Normalizing every outcome into an [`ApiResult`]
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Concurrent calls share one rate limiter and
/// one connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use yookassa_api::{YookassaConfig, ShopId, SecretKey};
/// use yookassa_api::clients::{HttpClient, HttpMethod, RequestDescriptor};
///
/// let config = YookassaConfig::builder()
///     .shop_id(ShopId::new("123456").unwrap())
///     .secret_key(SecretKey::new("test_secret").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config)?;
///
/// let descriptor = RequestDescriptor::builder(HttpMethod::Get, "/payments/{payment_id}")
///     .path_param("payment_id", "2d5a2b4c-000f-5000-9000-1b68e7b15f3f")
///     .build()?;
///
/// let result = client.execute(descriptor).await;
/// println!("{}", result.to_json());
/// ```
#[derive(Debug)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    rate_limiter: RateLimiter,
    retry_policy: RetryPolicy,
    shop_id: ShopId,
    endpoint: Endpoint,
    timeout: Duration,
    retries: u32,
    debug: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be built, e.g. when
    /// the proxy URL is rejected.
    pub fn new(config: &YookassaConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client using a custom transport.
    #[must_use]
    pub fn with_transport(config: &YookassaConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            rate_limiter: RateLimiter::new(config.max_rps()),
            retry_policy: RetryPolicy::from_config(config),
            shop_id: config.shop_id().clone(),
            endpoint: config.endpoint().clone(),
            timeout: config.timeout(),
            retries: config.retries(),
            debug: config.debug(),
        }
    }

    /// Returns the shop this client authenticates as.
    #[must_use]
    pub const fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// Returns the API root URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the number of retries after the initial attempt.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the shared rate limiter.
    #[must_use]
    pub const fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Executes one logical API call.
    ///
    /// Never fails with a Rust error: every outcome, including exhausted
    /// retries, is an [`ApiResult`]. Worst-case duration is
    /// `(retries + 1) × timeout` plus the backoff waits.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> ApiResult {
        self.execute_with_cancellation(descriptor, &CancellationToken::new())
            .await
    }

    /// Executes one logical API call that can be cancelled.
    ///
    /// When `cancel` fires, the pending wait or attempt is abandoned, no
    /// further attempts are made and the call ends with
    /// [`ErrorKind::Cancelled`].
    pub async fn execute_with_cancellation(
        &self,
        descriptor: RequestDescriptor,
        cancel: &CancellationToken,
    ) -> ApiResult {
        let key = descriptor
            .idempotency_key()
            .cloned()
            .unwrap_or_else(IdempotencyKey::generate);
        let request = self.transport_request(&descriptor, &key);

        let mut last_failure: Option<AttemptFailure> = None;

        for attempt in 0..=self.retries {
            if self.debug {
                tracing::debug!(
                    method = %descriptor.method(),
                    path = descriptor.path(),
                    attempt,
                    idempotency_key = %key,
                    "Sending request to YooKassa API"
                );
            }

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return Self::cancelled(key),
                result = async {
                    self.rate_limiter.admit().await;
                    self.transport.send(request.clone()).await
                } => result,
            };

            match self.retry_policy.classify(result) {
                AttemptOutcome::Success { status, body } => {
                    if self.debug {
                        tracing::debug!(attempt, status, idempotency_key = %key, "Request succeeded");
                    }
                    return ApiResult::Ok {
                        data: body,
                        request_id: key,
                    };
                }
                AttemptOutcome::TerminalFailure(failure) => {
                    if self.debug {
                        tracing::debug!(attempt, status = ?failure.status(), idempotency_key = %key, "Request rejected");
                    }
                    if let Some(payload) = failure.payload() {
                        return ApiResult::Err {
                            error: payload.clone(),
                            kind: ErrorKind::Api,
                            request_id: key,
                        };
                    }
                    last_failure = Some(failure);
                    break;
                }
                AttemptOutcome::RetryableFailure(failure) => {
                    if attempt < self.retries {
                        let delay = self.retry_policy.backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            retries = self.retries,
                            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                            status = ?failure.status(),
                            idempotency_key = %key,
                            "Transient YooKassa API failure, retrying after backoff"
                        );
                        tokio::select! {
                            biased;
                            () = cancel.cancelled() => return Self::cancelled(key),
                            () = tokio::time::sleep(delay) => {}
                        }
                    }
                    last_failure = Some(failure);
                }
            }
        }

        Self::synthesize_error(last_failure, key)
    }

    /// Resolves a descriptor into the request sent on every attempt.
    fn transport_request(
        &self,
        descriptor: &RequestDescriptor,
        key: &IdempotencyKey,
    ) -> TransportRequest {
        let mut headers = std::collections::HashMap::new();
        headers.insert(IDEMPOTENCE_KEY_HEADER.to_string(), key.to_string());

        TransportRequest {
            method: descriptor.method(),
            url: format!("{}{}", self.endpoint.as_ref(), descriptor.path()),
            query: descriptor.query().cloned(),
            headers,
            body: descriptor.body().map(ToString::to_string),
            timeout: self.timeout,
        }
    }

    fn cancelled(key: IdempotencyKey) -> ApiResult {
        ApiResult::Err {
            error: ApiErrorPayload::synthetic(key.as_ref(), CANCELLED_CODE, "Request was cancelled"),
            kind: ErrorKind::Cancelled,
            request_id: key,
        }
    }

    /// Builds the error returned once the attempt loop ends without a result.
    fn synthesize_error(last_failure: Option<AttemptFailure>, key: IdempotencyKey) -> ApiResult {
        let exhausted = || {
            (
                ApiErrorPayload::synthetic(
                    key.as_ref(),
                    RETRY_EXHAUSTED_CODE,
                    "All attempts to reach the YooKassa API failed",
                ),
                ErrorKind::RetryExhausted,
            )
        };

        let (error, kind) = match last_failure {
            Some(AttemptFailure::Response {
                payload: Some(payload),
                ..
            }) => (payload, ErrorKind::Api),
            Some(AttemptFailure::Response {
                status,
                body_snippet,
                ..
            }) => {
                let description = if body_snippet.is_empty() {
                    format!("Request failed with HTTP status {status}")
                } else {
                    format!("Request failed with HTTP status {status}: {body_snippet}")
                };
                (
                    ApiErrorPayload::synthetic(key.as_ref(), status_code(status), description),
                    ErrorKind::Http,
                )
            }
            Some(AttemptFailure::Transport(error)) => match error.code() {
                Some(code) => (
                    ApiErrorPayload::synthetic(key.as_ref(), code, error.message),
                    ErrorKind::Network,
                ),
                None => exhausted(),
            },
            None => exhausted(),
        };

        ApiResult::Err {
            error,
            kind,
            request_id: key,
        }
    }
}

/// Maps an HTTP status without an error envelope to a synthetic error code.
fn status_code(status: u16) -> String {
    match status {
        400 => "invalid_request".to_string(),
        401 => "invalid_credentials".to_string(),
        403 => "forbidden".to_string(),
        404 => "not_found".to_string(),
        405 => "method_not_allowed".to_string(),
        429 => "too_many_requests".to_string(),
        500 => "internal_server_error".to_string(),
        502 => "bad_gateway".to_string(),
        503 => "service_unavailable".to_string(),
        504 => "gateway_timeout".to_string(),
        other => format!("http_{other}"),
    }
}
