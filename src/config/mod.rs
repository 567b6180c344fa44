//! Configuration types for the YooKassa API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with YooKassa.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`YookassaConfig`]: The main configuration struct holding all SDK settings
//! - [`YookassaConfigBuilder`]: A builder for constructing [`YookassaConfig`] instances
//! - [`ShopId`]: A validated shop identifier newtype
//! - [`SecretKey`]: A validated secret key newtype with masked debug output
//! - [`Endpoint`]: A validated API root URL
//! - [`ProxyUrl`]: A validated forward proxy URL
//!
//! # Example
//!
//! ```rust
//! use yookassa_api::{YookassaConfig, ShopId, SecretKey};
//! use std::time::Duration;
//!
//! let config = YookassaConfig::builder()
//!     .shop_id(ShopId::new("123456").unwrap())
//!     .secret_key(SecretKey::new("test_secret").unwrap())
//!     .max_rps(10)
//!     .timeout(Duration::from_secs(3))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retries(), 5);
//! ```

mod newtypes;

use std::time::Duration;

pub use newtypes::{Endpoint, ProxyUrl, SecretKey, ShopId};

use crate::error::ConfigError;

/// Default requests-per-second ceiling.
pub const DEFAULT_MAX_RPS: u32 = 5;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default number of retries after the initial attempt.
pub const DEFAULT_RETRIES: u32 = 5;

/// Default base delay for exponential backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Configuration for the YooKassa API SDK.
///
/// All optional settings are resolved to concrete values when the builder
/// runs, so the request pipeline never re-reads defaults per call.
///
/// # Thread Safety
///
/// `YookassaConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use yookassa_api::{YookassaConfig, ShopId, SecretKey};
///
/// let config = YookassaConfig::builder()
///     .shop_id(ShopId::new("123456").unwrap())
///     .secret_key(SecretKey::new("test_secret").unwrap())
///     .debug(true)
///     .build()
///     .unwrap();
///
/// assert!(config.debug());
/// ```
#[derive(Clone, Debug)]
pub struct YookassaConfig {
    shop_id: ShopId,
    secret_key: SecretKey,
    endpoint: Endpoint,
    debug: bool,
    max_rps: u32,
    timeout: Duration,
    retries: u32,
    proxy: Option<ProxyUrl>,
    user_agent_prefix: Option<String>,
    retry_base_delay: Duration,
    max_retry_delay: Option<Duration>,
}

impl YookassaConfig {
    /// Creates a new builder for constructing a `YookassaConfig`.
    #[must_use]
    pub fn builder() -> YookassaConfigBuilder {
        YookassaConfigBuilder::new()
    }

    /// Returns the shop identifier.
    #[must_use]
    pub const fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the API root URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns whether per-attempt debug logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the requests-per-second ceiling.
    #[must_use]
    pub const fn max_rps(&self) -> u32 {
        self.max_rps
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of retries after the initial attempt.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the forward proxy, if configured.
    #[must_use]
    pub const fn proxy(&self) -> Option<&ProxyUrl> {
        self.proxy.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the base delay used for exponential backoff.
    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }

    /// Returns the backoff cap, if configured.
    #[must_use]
    pub const fn max_retry_delay(&self) -> Option<Duration> {
        self.max_retry_delay
    }
}

// Verify YookassaConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<YookassaConfig>();
};

/// Builder for constructing [`YookassaConfig`] instances.
///
/// Required fields are `shop_id` and `secret_key`. All other fields have
/// defaults.
///
/// # Defaults
///
/// - `endpoint`: `https://api.yookassa.ru/v3`
/// - `debug`: `false`
/// - `max_rps`: 5
/// - `timeout`: 5000 ms
/// - `retries`: 5
/// - `proxy`: `None`
/// - `user_agent_prefix`: `None`
/// - `retry_base_delay`: 1000 ms
/// - `max_retry_delay`: `None` (uncapped)
#[derive(Debug, Default)]
pub struct YookassaConfigBuilder {
    shop_id: Option<ShopId>,
    secret_key: Option<SecretKey>,
    endpoint: Option<Endpoint>,
    debug: Option<bool>,
    max_rps: Option<u32>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    proxy: Option<ProxyUrl>,
    user_agent_prefix: Option<String>,
    retry_base_delay: Option<Duration>,
    max_retry_delay: Option<Duration>,
}

impl YookassaConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop identifier (required).
    #[must_use]
    pub fn shop_id(mut self, shop_id: ShopId) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Overrides the API root URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Enables per-attempt debug logging.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the requests-per-second ceiling shared by all calls of a client.
    #[must_use]
    pub const fn max_rps(mut self, max_rps: u32) -> Self {
        self.max_rps = Some(max_rps);
        self
    }

    /// Sets the timeout applied to each individual attempt.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries after the initial attempt.
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Routes all requests through an HTTP/HTTPS forward proxy.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxyUrl) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the base delay for exponential backoff between attempts.
    #[must_use]
    pub const fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Caps the backoff delay between attempts.
    #[must_use]
    pub const fn max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay = Some(delay);
        self
    }

    /// Builds the [`YookassaConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop_id` or
    /// `secret_key` are not set, [`ConfigError::InvalidMaxRps`] for a zero
    /// rate and [`ConfigError::InvalidTimeout`] for a zero timeout.
    pub fn build(self) -> Result<YookassaConfig, ConfigError> {
        let shop_id = self
            .shop_id
            .ok_or(ConfigError::MissingRequiredField { field: "shop_id" })?;
        let secret_key = self
            .secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "secret_key",
            })?;

        let max_rps = self.max_rps.unwrap_or(DEFAULT_MAX_RPS);
        if max_rps == 0 {
            return Err(ConfigError::InvalidMaxRps);
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(YookassaConfig {
            shop_id,
            secret_key,
            endpoint: self.endpoint.unwrap_or_default(),
            debug: self.debug.unwrap_or(false),
            max_rps,
            timeout,
            retries: self.retries.unwrap_or(DEFAULT_RETRIES),
            proxy: self.proxy,
            user_agent_prefix: self.user_agent_prefix,
            retry_base_delay: self.retry_base_delay.unwrap_or(DEFAULT_RETRY_BASE_DELAY),
            max_retry_delay: self.max_retry_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> YookassaConfigBuilder {
        YookassaConfig::builder()
            .shop_id(ShopId::new("123456").unwrap())
            .secret_key(SecretKey::new("test_secret").unwrap())
    }

    #[test]
    fn test_builder_requires_shop_id() {
        let result = YookassaConfigBuilder::new()
            .secret_key(SecretKey::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop_id" })
        ));
    }

    #[test]
    fn test_builder_requires_secret_key() {
        let result = YookassaConfigBuilder::new()
            .shop_id(ShopId::new("123456").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "secret_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.endpoint().as_ref(), "https://api.yookassa.ru/v3");
        assert!(!config.debug());
        assert_eq!(config.max_rps(), 5);
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.retries(), 5);
        assert!(config.proxy().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.retry_base_delay(), Duration::from_secs(1));
        assert!(config.max_retry_delay().is_none());
    }

    #[test]
    fn test_builder_rejects_zero_max_rps() {
        let result = base_builder().max_rps(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidMaxRps)));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = base_builder().timeout(Duration::ZERO).build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn test_builder_allows_zero_retries() {
        let config = base_builder().retries(0).build().unwrap();
        assert_eq!(config.retries(), 0);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = base_builder()
            .endpoint(Endpoint::new("http://localhost:8080/v3/").unwrap())
            .debug(true)
            .max_rps(20)
            .timeout(Duration::from_secs(2))
            .retries(2)
            .proxy(ProxyUrl::new("http://proxy.local:3128").unwrap())
            .user_agent_prefix("MyShop/1.0")
            .retry_base_delay(Duration::from_millis(250))
            .max_retry_delay(Duration::from_secs(4))
            .build()
            .unwrap();

        assert_eq!(config.endpoint().as_ref(), "http://localhost:8080/v3");
        assert!(config.debug());
        assert_eq!(config.max_rps(), 20);
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.retries(), 2);
        assert_eq!(
            config.proxy().map(AsRef::as_ref),
            Some("http://proxy.local:3128")
        );
        assert_eq!(config.user_agent_prefix(), Some("MyShop/1.0"));
        assert_eq!(config.retry_base_delay(), Duration::from_millis(250));
        assert_eq!(config.max_retry_delay(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_config_debug_does_not_leak_secret() {
        let config = base_builder().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("YookassaConfig"));
        assert!(!debug_str.contains("test_secret"));
    }
}
