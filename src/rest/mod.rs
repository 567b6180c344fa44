//! REST Resource infrastructure for the YooKassa API.
//!
//! This module provides:
//!
//! - **[`RestResource`] trait**: `create`, `list` and `info` for every resource
//! - **Path tables**: [`ResourcePath`] entries resolved per [`ResourceOperation`]
//! - **[`ResourceError`]**: What resource methods return on failure
//! - **[`resources`]**: Payments, refunds and receipts
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::clients::HttpClient;
//! use yookassa_api::rest::RestResource;
//! use yookassa_api::rest::resources::{Amount, CreatePaymentParams, Payment};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let payment = Payment::create(&client, &CreatePaymentParams::new(Amount::rub("10.00")), None).await?;
//! let payment = Payment::info(&client, &payment.id).await?;
//! let payment = Payment::cancel(&client, &payment.id, None).await?;
//! ```

mod errors;
mod path;
mod resource;

pub mod resources;

pub use errors::ResourceError;
pub use path::{get_path, ResourceOperation, ResourcePath};
pub use resource::RestResource;
