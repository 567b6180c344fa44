//! Payment resource implementation.
//!
//! Payments are created, then (for two-stage payments) captured or
//! cancelled once the buyer has authorized them.
//!
//! # Paths
//!
//! - Create: `POST /payments`
//! - List: `GET /payments`
//! - Info: `GET /payments/{payment_id}`
//! - Capture: `POST /payments/{payment_id}/capture`
//! - Cancel: `POST /payments/{payment_id}/cancel`
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::rest::RestResource;
//! use yookassa_api::rest::resources::{Amount, ConfirmationRequest, CreatePaymentParams, Payment};
//!
//! let params = CreatePaymentParams {
//!     capture: Some(false),
//!     confirmation: Some(ConfirmationRequest::Redirect {
//!         return_url: "https://shop.example/return".to_string(),
//!         enforce: None,
//!     }),
//!     ..CreatePaymentParams::new(Amount::rub("100.00"))
//! };
//! let payment = Payment::create(&client, &params, None).await?;
//!
//! // Once the buyer has paid:
//! let payment = Payment::capture(&client, &payment.id, None, None).await?;
//! assert_eq!(payment.status, PaymentStatus::Succeeded);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, HttpMethod, IdempotencyKey};
use crate::rest::resources::common::{Amount, CancellationDetails};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};

/// The lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, waiting for the buyer.
    Pending,
    /// Authorized, waiting for capture or cancellation.
    WaitingForCapture,
    /// Paid.
    Succeeded,
    /// Cancelled or expired.
    Canceled,
    /// A status this SDK version does not know.
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Returns `true` once the payment can no longer change.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled)
    }
}

/// How the buyer confirms a payment, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// The confirmation scenario, e.g. `redirect`.
    #[serde(rename = "type")]
    pub confirmation_type: String,
    /// Where to send the buyer to confirm the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
    /// Where the buyer returns after confirming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Token for the embedded widget scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,
}

/// The confirmation scenario requested when creating a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfirmationRequest {
    /// Redirect the buyer to the payment page.
    Redirect {
        /// Where the buyer returns afterwards.
        return_url: String,
        /// Require 3-D Secure for card payments.
        #[serde(skip_serializing_if = "Option::is_none")]
        enforce: Option<bool>,
    },
    /// Confirm in the embedded widget.
    Embedded,
    /// Confirm outside the merchant's site (e.g. by SMS).
    External,
    /// Confirm in a mobile application.
    MobileApplication {
        /// Where the buyer returns afterwards.
        return_url: String,
    },
}

/// A payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// The payment ID.
    pub id: String,
    /// The current status.
    pub status: PaymentStatus,
    /// The amount charged to the buyer.
    pub amount: Amount,
    /// The amount credited to the shop after fees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Amount>,
    /// The amount already refunded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Amount>,
    /// The payment description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the payment was paid.
    #[serde(default)]
    pub paid: bool,
    /// Whether the payment can be refunded.
    #[serde(default)]
    pub refundable: bool,
    /// Whether the payment was made in test mode.
    #[serde(default)]
    pub test: bool,
    /// When the payment was created.
    pub created_at: DateTime<Utc>,
    /// When the payment was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    /// Until when an authorized payment can be captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// How the buyer confirms the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    /// The payment method, as returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<serde_json::Value>,
    /// Why the payment was cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    /// Merchant metadata attached at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePaymentParams {
    /// The amount to charge.
    pub amount: Amount,
    /// Shown to the buyer; up to 128 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `true` captures automatically; `false` waits for [`Payment::capture`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,
    /// The confirmation scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<ConfirmationRequest>,
    /// Charge a saved payment method instead of asking the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    /// The payment method to use, e.g. `{"type": "bank_card"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_data: Option<serde_json::Value>,
    /// Save the payment method for recurring charges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_payment_method: Option<bool>,
    /// Fiscal receipt data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<serde_json::Value>,
    /// The buyer's IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Merchant metadata returned with the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl CreatePaymentParams {
    /// Creates params charging `amount` with every optional field unset.
    #[must_use]
    pub const fn new(amount: Amount) -> Self {
        Self {
            amount,
            description: None,
            capture: None,
            confirmation: None,
            payment_method_id: None,
            payment_method_data: None,
            save_payment_method: None,
            receipt: None,
            client_ip: None,
            metadata: None,
        }
    }
}

/// Body of `POST /payments/{payment_id}/capture`.
///
/// Leave `amount` unset to capture the full authorized amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapturePaymentParams {
    /// The amount to capture; at most the authorized amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Fiscal receipt data for a partial capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<serde_json::Value>,
}

/// Filters and pagination for `GET /payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentListParams {
    /// Page size, 1 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Only payments with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Only payments with this payment method type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Created at or after.
    #[serde(rename = "created_at.gte", skip_serializing_if = "Option::is_none")]
    pub created_at_gte: Option<DateTime<Utc>>,
    /// Created after.
    #[serde(rename = "created_at.gt", skip_serializing_if = "Option::is_none")]
    pub created_at_gt: Option<DateTime<Utc>>,
    /// Created at or before.
    #[serde(rename = "created_at.lte", skip_serializing_if = "Option::is_none")]
    pub created_at_lte: Option<DateTime<Utc>>,
    /// Created before.
    #[serde(rename = "created_at.lt", skip_serializing_if = "Option::is_none")]
    pub created_at_lt: Option<DateTime<Utc>>,
}

impl RestResource for Payment {
    type CreateParams = CreatePaymentParams;
    type ListParams = PaymentListParams;

    const NAME: &'static str = "Payment";
    const ID_PARAM: &'static str = "payment_id";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/payments"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/payments"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Info,
            &["payment_id"],
            "/payments/{payment_id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Capture,
            &["payment_id"],
            "/payments/{payment_id}/capture",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Cancel,
            &["payment_id"],
            "/payments/{payment_id}/cancel",
        ),
    ];
}

impl Payment {
    /// Captures an authorized payment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the call fails, e.g. when the
    /// payment is not in `waiting_for_capture`.
    pub async fn capture(
        client: &HttpClient,
        payment_id: &str,
        params: Option<&CapturePaymentParams>,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Result<Self, ResourceError> {
        let body = params
            .map(serde_json::to_value)
            .transpose()
            .map_err(|source| ResourceError::Serialize {
                resource: Self::NAME,
                source,
            })?;

        Self::send_operation(
            client,
            ResourceOperation::Capture,
            &[(Self::ID_PARAM, payment_id)],
            None,
            body,
            idempotency_key,
        )
        .await
    }

    /// Cancels an authorized payment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the call fails.
    pub async fn cancel(
        client: &HttpClient,
        payment_id: &str,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Result<Self, ResourceError> {
        Self::send_operation(
            client,
            ResourceOperation::Cancel,
            &[(Self::ID_PARAM, payment_id)],
            None,
            None,
            idempotency_key,
        )
        .await
    }
}
