//! Error types for the YooKassa API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. API-level failures are never reported through this
//! type; they travel as [`ApiResult::Err`](crate::clients::ApiResult) values.
//!
//! # Example
//!
//! ```rust
//! use yookassa_api::{ShopId, ConfigError};
//!
//! let result = ShopId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyShopId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant is a programmer or configuration error and is reported at
/// construction time, never per request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Shop identifier cannot be empty.
    #[error("Shop id cannot be empty. Please provide the shop identifier from your YooKassa account.")]
    EmptyShopId,

    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide a valid YooKassa secret key.")]
    EmptySecretKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.yookassa.ru/v3').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Proxy URL is invalid.
    #[error("Invalid proxy URL '{url}'. Expected an http:// or https:// URL.")]
    InvalidProxyUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The requests-per-second ceiling must be positive.
    #[error("max_rps must be greater than zero.")]
    InvalidMaxRps,

    /// The per-attempt timeout must be positive.
    #[error("timeout must be greater than zero.")]
    InvalidTimeout,

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClientBuild {
        /// The reason reported by the HTTP library.
        reason: String,
    },
}
