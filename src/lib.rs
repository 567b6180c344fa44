//! # YooKassa API Rust SDK
//!
//! A Rust SDK for the YooKassa payments API, providing type-safe
//! configuration and a reliable async request pipeline.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`YookassaConfig`] and [`YookassaConfigBuilder`]
//! - Validated newtypes for credentials and URLs
//! - One idempotency key per logical call, shared by all its retries
//! - Client-side rate limiting at a fixed requests-per-second ceiling
//! - Retries with exponential backoff for network failures, 5xx and 429
//! - A uniform [`ApiResult`](clients::ApiResult) for every outcome
//! - Typed payments, refunds and receipts via [`rest::RestResource`]
//! - A [`ClientRegistry`] sharing one client per shop
//!
//! ## Quick Start
//!
//! ```rust
//! use yookassa_api::{YookassaConfig, ShopId, SecretKey};
//!
//! let config = YookassaConfig::builder()
//!     .shop_id(ShopId::new("123456").unwrap())
//!     .secret_key(SecretKey::new("test_secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use yookassa_api::HttpClient;
//! use yookassa_api::rest::RestResource;
//! use yookassa_api::rest::resources::{Amount, CreatePaymentParams, Payment};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let payment = Payment::create(
//!     &client,
//!     &CreatePaymentParams::new(Amount::rub("100.00")),
//!     None,
//! )
//! .await?;
//! println!("{} is {:?}", payment.id, payment.status);
//! ```
//!
//! ## Raw Calls
//!
//! The pipeline can be driven directly for endpoints without a typed wrapper:
//!
//! ```rust,ignore
//! use yookassa_api::clients::{HttpMethod, RequestDescriptor};
//!
//! let descriptor = RequestDescriptor::builder(HttpMethod::Get, "/payments/{payment_id}")
//!     .path_param("payment_id", &payment_id)
//!     .build()?;
//!
//! let result = client.execute(descriptor).await;
//! println!("{}", result.to_json());
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events and never installs a subscriber. Retries
//! are logged at `warn`; per-attempt details at `debug` when
//! [`YookassaConfig::debug`] is set.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod registry;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    Endpoint, ProxyUrl, SecretKey, ShopId, YookassaConfig, YookassaConfigBuilder,
};
pub use error::ConfigError;
pub use registry::ClientRegistry;

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiResult, ErrorKind, HttpClient, HttpMethod, IdempotencyKey, RequestDescriptor,
};
