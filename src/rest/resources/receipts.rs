//! Receipt resource implementation.
//!
//! Fiscal receipts registered for payments and refunds.
//!
//! # Paths
//!
//! - Create: `POST /receipts`
//! - List: `GET /receipts`
//! - Info: `GET /receipts/{receipt_id}`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::resources::common::Amount;
use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// Whether a receipt belongs to a payment or a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    /// An income receipt.
    Payment,
    /// A return-of-income receipt.
    Refund,
}

/// The registration status of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Sent to the online cash register, not yet registered.
    Pending,
    /// Registered.
    Succeeded,
    /// Registration failed.
    Canceled,
    /// A status this SDK version does not know.
    #[serde(other)]
    Unknown,
}

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Name of the good or service.
    pub description: String,
    /// Quantity; the API accepts both numbers and decimal strings.
    pub quantity: serde_json::Value,
    /// Price of the whole line.
    pub amount: Amount,
    /// VAT rate code, 1 to 6.
    pub vat_code: u8,
    /// Subject of the calculation, e.g. `commodity`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_subject: Option<String>,
    /// Method of the calculation, e.g. `full_payment`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
}

/// A settlement recorded on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The settlement type, e.g. `cashless` or `prepayment`.
    #[serde(rename = "type")]
    pub settlement_type: String,
    /// The settled amount.
    pub amount: Amount,
}

/// The buyer a receipt is sent to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptCustomer {
    /// The buyer's full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// The buyer's taxpayer number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    /// Email the receipt is sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone the receipt is sent to, in ITU-T E.164 format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A fiscal receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// The receipt ID.
    pub id: String,
    /// Payment or refund receipt.
    #[serde(rename = "type")]
    pub receipt_type: ReceiptType,
    /// The registration status.
    pub status: ReceiptStatus,
    /// The payment the receipt belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// The refund the receipt belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    /// Fiscal document number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_document_number: Option<String>,
    /// Fiscal storage number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_storage_number: Option<String>,
    /// Fiscal attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_attribute: Option<String>,
    /// When the receipt was registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    /// Tax system code, 1 to 6.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
    /// The receipt lines.
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    /// The settlements.
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// Body of `POST /receipts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateReceiptParams {
    /// Payment or refund receipt.
    #[serde(rename = "type")]
    pub receipt_type: ReceiptType,
    /// The payment the receipt belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// The refund the receipt belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    /// The buyer.
    pub customer: ReceiptCustomer,
    /// The receipt lines.
    pub items: Vec<ReceiptItem>,
    /// Whether to send the receipt to the buyer.
    pub send: bool,
    /// The settlements.
    pub settlements: Vec<Settlement>,
    /// Tax system code, 1 to 6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
}

/// Filters and pagination for `GET /receipts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiptListParams {
    /// Page size, 1 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Only receipts of this payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Only receipts of this refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    /// Only receipts with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReceiptStatus>,
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

impl RestResource for Receipt {
    type CreateParams = CreateReceiptParams;
    type ListParams = ReceiptListParams;

    const NAME: &'static str = "Receipt";
    const ID_PARAM: &'static str = "receipt_id";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/receipts"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/receipts"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Info,
            &["receipt_id"],
            "/receipts/{receipt_id}",
        ),
    ];
}
