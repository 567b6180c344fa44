//! Refund resource implementation.
//!
//! A refund returns all or part of a succeeded payment to the buyer.
//!
//! # Paths
//!
//! - Create: `POST /refunds`
//! - List: `GET /refunds`
//! - Info: `GET /refunds/{refund_id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::rest::RestResource;
//! use yookassa_api::rest::resources::{Amount, CreateRefundParams, Refund, RefundListParams};
//!
//! let params = CreateRefundParams::new(payment.id.clone(), Amount::rub("1.00"));
//! let refund = Refund::create(&client, &params, None).await?;
//!
//! let refunds = Refund::list(&client, Some(RefundListParams {
//!     payment_id: Some(payment.id.clone()),
//!     ..Default::default()
//! })).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::resources::common::{Amount, CancellationDetails};
use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// The status of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    /// Being processed.
    Pending,
    /// Returned to the buyer.
    Succeeded,
    /// Rejected.
    Canceled,
    /// A status this SDK version does not know.
    #[serde(other)]
    Unknown,
}

/// A refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    /// The refund ID.
    pub id: String,
    /// The refunded payment.
    pub payment_id: String,
    /// The current status.
    pub status: RefundStatus,
    /// The refunded amount.
    pub amount: Amount,
    /// When the refund was created.
    pub created_at: DateTime<Utc>,
    /// The reason given for the refund.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Why the refund was cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    /// Registration status of the refund receipt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_registration: Option<String>,
}

/// Body of `POST /refunds`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRefundParams {
    /// The payment to refund.
    pub payment_id: String,
    /// The amount to return.
    pub amount: Amount,
    /// The reason for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fiscal receipt data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<serde_json::Value>,
}

impl CreateRefundParams {
    /// Creates params refunding `amount` of `payment_id`.
    #[must_use]
    pub fn new(payment_id: impl Into<String>, amount: Amount) -> Self {
        Self {
            payment_id: payment_id.into(),
            amount,
            description: None,
            receipt: None,
        }
    }
}

/// Filters and pagination for `GET /refunds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefundListParams {
    /// Page size, 1 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Only refunds of this payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Only refunds with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RefundStatus>,
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

impl RestResource for Refund {
    type CreateParams = CreateRefundParams;
    type ListParams = RefundListParams;

    const NAME: &'static str = "Refund";
    const ID_PARAM: &'static str = "refund_id";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/refunds"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/refunds"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Info,
            &["refund_id"],
            "/refunds/{refund_id}",
        ),
    ];
}
