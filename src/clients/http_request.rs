//! Request descriptor types for the YooKassa API SDK.
//!
//! This module provides the [`RequestDescriptor`] type and its builder for
//! describing one logical API call, plus the [`IdempotencyKey`] that ties
//! all physical attempts of that call together.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::errors::InvalidRequestError;

/// HTTP methods used by the YooKassa API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and state transitions.
    Post,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque token identifying one logical operation.
///
/// The same key is sent in the `Idempotence-Key` header of every attempt of
/// a call, so the server treats retries as the same operation.
///
/// # Example
///
/// ```rust
/// use yookassa_api::clients::IdempotencyKey;
///
/// let generated = IdempotencyKey::generate();
/// assert_eq!(generated.as_ref().len(), 36);
///
/// let supplied = IdempotencyKey::new("order-42-payment").unwrap();
/// assert_eq!(supplied.to_string(), "order-42-payment");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Creates a key from a caller-supplied value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::EmptyIdempotencyKey`] if the value is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, InvalidRequestError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(InvalidRequestError::EmptyIdempotencyKey);
        }
        Ok(Self(key))
    }

    /// Generates a fresh random (UUID v4) key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A description of one logical API call.
///
/// Use [`RequestDescriptor::builder`] to construct descriptors. Once built a
/// descriptor is immutable; the path template has been resolved and the body
/// rule (POST only) has been checked.
///
/// # Example
///
/// ```rust
/// use yookassa_api::clients::{HttpMethod, RequestDescriptor};
/// use serde_json::json;
///
/// let descriptor = RequestDescriptor::builder(HttpMethod::Post, "/payments/{payment_id}/capture")
///     .path_param("payment_id", "2d5a2b4c-000f-5000-9000-1b68e7b15f3f")
///     .body(json!({"amount": {"value": "10.00", "currency": "RUB"}}))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     descriptor.path(),
///     "/payments/2d5a2b4c-000f-5000-9000-1b68e7b15f3f/capture"
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    template: String,
    path: String,
    query: Option<HashMap<String, String>>,
    body: Option<serde_json::Value>,
    idempotency_key: Option<IdempotencyKey>,
}

impl RequestDescriptor {
    /// Creates a new builder for constructing a `RequestDescriptor`.
    #[must_use]
    pub fn builder(method: HttpMethod, template: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::new(method, template)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the unresolved path template (e.g. `/payments/{payment_id}`).
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the resolved path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters, if any.
    #[must_use]
    pub const fn query(&self) -> Option<&HashMap<String, String>> {
        self.query.as_ref()
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Returns the caller-supplied idempotency key, if any.
    #[must_use]
    pub const fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }
}

/// Builder for constructing [`RequestDescriptor`] instances.
#[derive(Debug)]
pub struct RequestDescriptorBuilder {
    method: HttpMethod,
    template: String,
    path_params: HashMap<String, String>,
    query: Option<HashMap<String, String>>,
    body: Option<serde_json::Value>,
    idempotency_key: Option<IdempotencyKey>,
}

impl RequestDescriptorBuilder {
    fn new(method: HttpMethod, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
            path_params: HashMap::new(),
            query: None,
            body: None,
            idempotency_key: None,
        }
    }

    /// Sets the value substituted for `{name}` in the path template.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.path_params.insert(name.into(), value.to_string());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the JSON request body. Only valid for POST.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the idempotency key used for every attempt of this call.
    #[must_use]
    pub fn idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Sets the idempotency key if one is given.
    #[must_use]
    pub fn maybe_idempotency_key(mut self, key: Option<IdempotencyKey>) -> Self {
        if key.is_some() {
            self.idempotency_key = key;
        }
        self
    }

    /// Builds the [`RequestDescriptor`], resolving the path template.
    ///
    /// POST requests without a body are sent with an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if:
    /// - a body is set on a GET or DELETE request
    /// - a placeholder in the template has no value, or an empty one
    pub fn build(self) -> Result<RequestDescriptor, InvalidRequestError> {
        if self.body.is_some() && self.method != HttpMethod::Post {
            return Err(InvalidRequestError::BodyNotAllowed {
                method: self.method.to_string(),
            });
        }

        let path = resolve_template(&self.template, &self.path_params)?;

        let body = match self.method {
            HttpMethod::Post => Some(self.body.unwrap_or_else(|| serde_json::json!({}))),
            HttpMethod::Get | HttpMethod::Delete => None,
        };

        Ok(RequestDescriptor {
            method: self.method,
            template: self.template,
            path,
            query: self.query.filter(|q| !q.is_empty()),
            body,
            idempotency_key: self.idempotency_key,
        })
    }
}

/// Substitutes `{name}` placeholders, percent-encoding each value.
fn resolve_template(
    template: &str,
    params: &HashMap<String, String>,
) -> Result<String, InvalidRequestError> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        resolved.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            resolved.push_str(&rest[open..]);
            return Ok(resolved);
        };

        let name = &after[..close];
        let value = params
            .get(name)
            .ok_or_else(|| InvalidRequestError::MissingPathParam {
                name: name.to_string(),
            })?;
        if value.is_empty() {
            return Err(InvalidRequestError::EmptyPathParam {
                name: name.to_string(),
            });
        }
        resolved.push_str(&urlencoding::encode(value));
        rest = &after[close + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let a = IdempotencyKey::generate();
        let b = IdempotencyKey::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_ref()).is_ok());
    }

    #[test]
    fn test_idempotency_key_rejects_empty() {
        assert!(matches!(
            IdempotencyKey::new("  "),
            Err(InvalidRequestError::EmptyIdempotencyKey)
        ));
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let descriptor = RequestDescriptor::builder(HttpMethod::Get, "/payments")
            .build()
            .unwrap();

        assert_eq!(descriptor.method(), HttpMethod::Get);
        assert_eq!(descriptor.path(), "/payments");
        assert!(descriptor.body().is_none());
        assert!(descriptor.query().is_none());
        assert!(descriptor.idempotency_key().is_none());
    }

    #[test]
    fn test_post_without_body_gets_empty_object() {
        let descriptor = RequestDescriptor::builder(HttpMethod::Post, "/payments/{payment_id}/cancel")
            .path_param("payment_id", "p-1")
            .build()
            .unwrap();

        assert_eq!(descriptor.body(), Some(&json!({})));
        assert_eq!(descriptor.path(), "/payments/p-1/cancel");
    }

    #[test]
    fn test_body_rejected_on_get() {
        let result = RequestDescriptor::builder(HttpMethod::Get, "/payments")
            .body(json!({"a": 1}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidRequestError::BodyNotAllowed { method }) if method == "GET"
        ));
    }

    #[test]
    fn test_missing_path_param_is_reported() {
        let result = RequestDescriptor::builder(HttpMethod::Get, "/refunds/{refund_id}").build();

        assert!(matches!(
            result,
            Err(InvalidRequestError::MissingPathParam { name }) if name == "refund_id"
        ));
    }

    #[test]
    fn test_empty_path_param_is_rejected() {
        let result = RequestDescriptor::builder(HttpMethod::Get, "/refunds/{refund_id}")
            .path_param("refund_id", "")
            .build();

        assert!(matches!(
            result,
            Err(InvalidRequestError::EmptyPathParam { .. })
        ));
    }

    #[test]
    fn test_path_params_are_percent_encoded() {
        let descriptor = RequestDescriptor::builder(HttpMethod::Get, "/receipts/{receipt_id}")
            .path_param("receipt_id", "a/b c")
            .build()
            .unwrap();

        assert_eq!(descriptor.path(), "/receipts/a%2Fb%20c");
        assert_eq!(descriptor.template(), "/receipts/{receipt_id}");
    }

    #[test]
    fn test_builder_with_query_params() {
        let descriptor = RequestDescriptor::builder(HttpMethod::Get, "/payments")
            .query_param("limit", "50")
            .query_param("status", "succeeded")
            .build()
            .unwrap();

        let query = descriptor.query().unwrap();
        assert_eq!(query.get("limit"), Some(&"50".to_string()));
        assert_eq!(query.get("status"), Some(&"succeeded".to_string()));
    }

    #[test]
    fn test_empty_query_map_is_dropped() {
        let descriptor = RequestDescriptor::builder(HttpMethod::Get, "/payments")
            .query(HashMap::new())
            .build()
            .unwrap();

        assert!(descriptor.query().is_none());
    }

    #[test]
    fn test_maybe_idempotency_key() {
        let key = IdempotencyKey::new("k-1").unwrap();
        let descriptor = RequestDescriptor::builder(HttpMethod::Post, "/payments")
            .maybe_idempotency_key(Some(key.clone()))
            .maybe_idempotency_key(None)
            .build()
            .unwrap();

        assert_eq!(descriptor.idempotency_key(), Some(&key));
    }
}
