//! REST resource implementations.
//!
//! # Available Resources
//!
//! | Resource | Operations |
//! |----------|------------|
//! | [`Payment`] | create, list, info, [`capture`](Payment::capture), [`cancel`](Payment::cancel) |
//! | [`Refund`] | create, list, info |
//! | [`Receipt`] | create, list, info |
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::rest::RestResource;
//! use yookassa_api::rest::resources::{Payment, PaymentListParams, PaymentStatus};
//!
//! let page = Payment::list(&client, Some(PaymentListParams {
//!     status: Some(PaymentStatus::Succeeded),
//!     limit: Some(20),
//!     ..Default::default()
//! })).await?;
//!
//! for payment in &page.items {
//!     println!("{} {}", payment.id, payment.amount);
//! }
//! ```

mod common;
mod payments;
mod receipts;
mod refunds;

pub use common::{Amount, CancellationDetails, ListResponse};
pub use payments::{
    CapturePaymentParams, Confirmation, ConfirmationRequest, CreatePaymentParams, Payment,
    PaymentListParams, PaymentStatus,
};
pub use receipts::{
    CreateReceiptParams, Receipt, ReceiptCustomer, ReceiptItem, ReceiptListParams, ReceiptStatus,
    ReceiptType, Settlement,
};
pub use refunds::{CreateRefundParams, Refund, RefundListParams, RefundStatus};
