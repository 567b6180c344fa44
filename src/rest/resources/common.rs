//! Types shared by several resources.

use serde::{Deserialize, Serialize};

/// A monetary amount.
///
/// The value is kept as the decimal string the API uses (e.g. `"100.00"`)
/// so no precision is lost in transit.
///
/// # Example
///
/// ```rust
/// use yookassa_api::rest::resources::Amount;
///
/// let amount = Amount::rub("100.00");
/// assert_eq!(amount.currency, "RUB");
/// assert_eq!(amount.to_string(), "100.00 RUB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Decimal amount, e.g. `"100.00"`.
    pub value: String,
    /// ISO 4217 currency code, e.g. `"RUB"`.
    pub currency: String,
}

impl Amount {
    /// Creates an amount in the given currency.
    #[must_use]
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
        }
    }

    /// Creates an amount in roubles.
    #[must_use]
    pub fn rub(value: impl Into<String>) -> Self {
        Self::new(value, "RUB")
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// One page of a list endpoint.
///
/// ```json
/// { "type": "list", "items": [...], "next_cursor": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The resources on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Cursor for the next page; `None` on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> ListResponse<T> {
    /// Returns `true` if another page is available.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Why a payment or refund was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    /// Who cancelled it: `yoo_money`, `payment_network` or `merchant`.
    pub party: String,
    /// The reason code, e.g. `expired_on_confirmation`.
    pub reason: String,
}
