//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated YooKassa shop identifier.
///
/// Used as the basic-auth username on every request and as the key of the
/// [`ClientRegistry`](crate::ClientRegistry).
///
/// # Example
///
/// ```rust
/// use yookassa_api::ShopId;
///
/// let shop_id = ShopId::new("123456").unwrap();
/// assert_eq!(shop_id.as_ref(), "123456");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShopId(String);

impl ShopId {
    /// Creates a new validated shop identifier.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyShopId`] if the identifier is empty.
    pub fn new(shop_id: impl Into<String>) -> Result<Self, ConfigError> {
        let shop_id = shop_id.into().trim().to_string();
        if shop_id.is_empty() {
            return Err(ConfigError::EmptyShopId);
        }
        Ok(Self(shop_id))
    }
}

impl AsRef<str> for ShopId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ShopId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShopId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated YooKassa secret key.
///
/// This newtype ensures the secret key is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use yookassa_api::SecretKey;
///
/// let secret = SecretKey::new("live_abc").unwrap();
/// assert_eq!(format!("{:?}", secret), "SecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Creates a new validated secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptySecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for SecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(*****)")
    }
}

/// A validated API root URL.
///
/// Trailing slashes are stripped on construction so that endpoint paths
/// (which always start with `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use yookassa_api::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.yookassa.ru/v3//").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://api.yookassa.ru/v3");
/// assert_eq!(endpoint.host_name(), Some("api.yookassa.ru"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl Endpoint {
    /// The production API root.
    pub const DEFAULT: &'static str = "https://api.yookassa.ru/v3";

    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let (scheme_end, host_start, host_end) =
            split_url(&url).ok_or_else(|| ConfigError::InvalidEndpoint { url: url.clone() })?;

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: 23,
        }
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// A validated forward proxy URL.
///
/// Only `http` and `https` proxies are accepted.
///
/// # Example
///
/// ```rust
/// use yookassa_api::ProxyUrl;
///
/// let proxy = ProxyUrl::new("http://proxy.local:3128").unwrap();
/// assert_eq!(proxy.as_ref(), "http://proxy.local:3128");
/// assert!(ProxyUrl::new("socks5://proxy.local:1080").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyUrl(String);

impl ProxyUrl {
    /// Creates a new validated proxy URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxyUrl`] if the URL is malformed or
    /// does not use the `http`/`https` scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();

        let Some((scheme_end, _, _)) = split_url(&url) else {
            return Err(ConfigError::InvalidProxyUrl { url });
        };

        if !matches!(
            url[..scheme_end].to_ascii_lowercase().as_str(),
            "http" | "https"
        ) {
            return Err(ConfigError::InvalidProxyUrl { url });
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for ProxyUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits a URL into `(scheme_end, host_start, host_end)` offsets.
fn split_url(url: &str) -> Option<(usize, usize, usize)> {
    let scheme_end = url.find("://")?;

    let scheme = &url[..scheme_end];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let host_start = scheme_end + 3;
    if host_start >= url.len() {
        return None;
    }

    // Host ends at port, path, query, or end of string
    let remainder = &url[host_start..];
    let host_end = remainder
        .find([':', '/', '?', '#'])
        .map_or(url.len(), |i| host_start + i);

    if host_end == host_start {
        return None;
    }

    Some((scheme_end, host_start, host_end))
}
