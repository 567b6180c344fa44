//! Shared client instances keyed by shop.
//!
//! [`ClientRegistry`] memoizes one [`HttpClient`] per [`ShopId`], so every
//! caller working with a shop shares its rate limiter and connection pool.
//! The registry only owns clients; it never reaches into their state.
//!
//! # Example
//!
//! ```rust
//! use yookassa_api::{ClientRegistry, YookassaConfig, ShopId, SecretKey};
//! use std::sync::Arc;
//!
//! let registry = ClientRegistry::new();
//! let config = YookassaConfig::builder()
//!     .shop_id(ShopId::new("123456").unwrap())
//!     .secret_key(SecretKey::new("test_secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let first = registry.get_or_create(&config).unwrap();
//! let second = registry.get_or_create(&config).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! // Drop the cached client, e.g. after rotating the secret key.
//! registry.evict(config.shop_id());
//! assert!(registry.is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::clients::HttpClient;
use crate::config::{ShopId, YookassaConfig};
use crate::error::ConfigError;

/// Registry of [`HttpClient`] instances keyed by shop ID.
///
/// # Thread Safety
///
/// `ClientRegistry` is `Send + Sync`; share it behind an `Arc` or a static.
///
/// # Staleness
///
/// A cached client keeps the configuration it was built with. Call
/// [`evict`](Self::evict) after changing credentials, limits or the
/// endpoint for a shop, then build a new one.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<ShopId, Arc<HttpClient>>>,
}

// Verify ClientRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientRegistry>();
};

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client for `config.shop_id()`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a new client has to be built and fails.
    pub fn get_or_create(&self, config: &YookassaConfig) -> Result<Arc<HttpClient>, ConfigError> {
        if let Some(client) = self.get(config.shop_id()) {
            return Ok(client);
        }

        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(config.shop_id()) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(HttpClient::new(config)?);
        clients.insert(config.shop_id().clone(), Arc::clone(&client));
        tracing::debug!(shop_id = %config.shop_id(), "Cached new YooKassa client");

        Ok(client)
    }

    /// Returns the cached client for a shop, if any.
    #[must_use]
    pub fn get(&self, shop_id: &ShopId) -> Option<Arc<HttpClient>> {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(shop_id)
            .cloned()
    }

    /// Removes the cached client for a shop and returns it.
    ///
    /// Callers still holding the client keep using it until they drop it.
    pub fn evict(&self, shop_id: &ShopId) -> Option<Arc<HttpClient>> {
        let evicted = self
            .clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(shop_id);
        if evicted.is_some() {
            tracing::debug!(shop_id = %shop_id, "Evicted cached YooKassa client");
        }
        evicted
    }

    /// Removes every cached client.
    pub fn clear(&self) {
        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        let count = clients.len();
        clients.clear();
        tracing::debug!(count, "Cleared YooKassa client registry");
    }

    /// Returns the number of cached clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no client is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
