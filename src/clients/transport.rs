//! Transport adapter between the request pipeline and the HTTP library.
//!
//! The [`Transport`] trait performs exactly one HTTP round trip. The default
//! implementation, [`ReqwestTransport`], wraps a shared `reqwest::Client`
//! (and therefore its connection pool) and attaches the headers and
//! credentials every YooKassa request needs.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::{TransportError, TransportErrorKind};
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;
use crate::config::{SecretKey, ShopId, YookassaConfig};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the idempotency key of a call.
pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

/// A fully resolved request, ready for one round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Absolute URL, including the API root.
    pub url: String,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Per-request headers (the idempotency key lives here).
    pub headers: HashMap<String, String>,
    /// Serialized JSON body.
    pub body: Option<String>,
    /// Timeout for this single attempt.
    pub timeout: Duration,
}

impl TransportRequest {
    /// Returns the idempotency key header value, if set.
    #[must_use]
    pub fn idempotency_key(&self) -> Option<&str> {
        self.headers.get(IDEMPOTENCE_KEY_HEADER).map(String::as_str)
    }
}

/// Performs one HTTP round trip.
///
/// Implementations must return `Err` only when no HTTP response was
/// obtained; any received status, including 4xx and 5xx, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends the request and returns the raw response.
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest`.
///
/// Every request carries:
/// - HTTP basic auth (shop id / secret key)
/// - `Content-Type: application/json`
/// - a fixed `User-Agent` identifying the SDK
///
/// When a proxy is configured all traffic is routed through it.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    shop_id: ShopId,
    secret_key: SecretKey,
    default_headers: HashMap<String, String>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxyUrl`] if reqwest rejects the proxy
    /// and [`ConfigError::HttpClientBuild`] if the client cannot be created.
    pub fn new(config: &YookassaConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}YooKassa Rust Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(proxy) = config.proxy() {
            let proxy =
                reqwest::Proxy::all(proxy.as_ref()).map_err(|_| ConfigError::InvalidProxyUrl {
                    url: proxy.as_ref().to_string(),
                })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| ConfigError::HttpClientBuild {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            shop_id: config.shop_id().clone(),
            secret_key: config.secret_key().clone(),
            default_headers,
        })
    }

    /// Returns the headers attached to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        req_builder = req_builder
            .basic_auth(self.shop_id.as_ref(), Some(self.secret_key.as_ref()))
            .timeout(request.timeout);

        for (key, value) in self.default_headers.iter().chain(&request.headers) {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await.map_err(|e| {
            let mut error = TransportError::from(e);
            if error.kind != TransportErrorKind::Timeout {
                error.kind = TransportErrorKind::Body;
            }
            error
        })?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
