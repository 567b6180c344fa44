//! REST Resource trait for YooKassa API resources.
//!
//! This module defines the [`RestResource`] trait. Resources that implement
//! it gain `create()`, `list()` and `info()` methods, each a thin call site
//! into the [`HttpClient`] pipeline.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives
//! 2. Declare its parameter types, name and path table
//! 3. The trait provides the default implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use yookassa_api::rest::{RestResource, ResourcePath, ResourceOperation};
//! use yookassa_api::clients::HttpMethod;
//!
//! impl RestResource for Refund {
//!     type CreateParams = CreateRefundParams;
//!     type ListParams = RefundListParams;
//!
//!     const NAME: &'static str = "Refund";
//!     const ID_PARAM: &'static str = "refund_id";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/refunds"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/refunds"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Info, &["refund_id"], "/refunds/{refund_id}"),
//!     ];
//! }
//!
//! // Usage:
//! let refund = Refund::info(&client, "2d5a2b4c-0015-5000-9000-1b68e7b15f3f").await?;
//! let refunds = Refund::list(&client, None).await?;
//! ```

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{HttpClient, IdempotencyKey, RequestDescriptor};
use crate::rest::resources::ListResponse;
use crate::rest::{get_path, ResourceError, ResourceOperation, ResourcePath};

/// A REST resource that can be created, listed and fetched.
///
/// # Associated Types
///
/// - `CreateParams`: The body of `create()`
/// - `ListParams`: Filters and pagination for `list()`
///
/// # Associated Constants
///
/// - `NAME`: The resource name used in error messages (e.g., "Payment")
/// - `ID_PARAM`: The path parameter naming one resource (e.g., `payment_id`)
/// - `PATHS`: Available paths for the resource's operations
#[allow(async_fn_in_trait)]
pub trait RestResource: DeserializeOwned + Send + Sync + Sized {
    /// The body sent by `create()`.
    type CreateParams: Serialize + Send + Sync;

    /// Filters and pagination for `list()`.
    type ListParams: Serialize + Default + Send + Sync;

    /// The name of the resource (e.g., "Payment").
    const NAME: &'static str;

    /// The path parameter identifying a single resource.
    const ID_PARAM: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Creates a new resource.
    ///
    /// A fresh idempotency key is generated unless `idempotency_key` is
    /// given; pass your own to make a create safe to repeat across process
    /// restarts.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the call fails and
    /// [`ResourceError::Deserialize`] if the response does not match the model.
    async fn create(
        client: &HttpClient,
        params: &Self::CreateParams,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Result<Self, ResourceError> {
        let body = serde_json::to_value(params).map_err(|source| ResourceError::Serialize {
            resource: Self::NAME,
            source,
        })?;

        Self::send_operation(
            client,
            ResourceOperation::Create,
            &[],
            None,
            Some(body),
            idempotency_key,
        )
        .await
    }

    /// Lists resources matching the given parameters.
    ///
    /// Returns one page; pass [`ListResponse::next_cursor`] back as the
    /// `cursor` parameter to fetch the next one.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the call fails.
    async fn list(
        client: &HttpClient,
        params: Option<Self::ListParams>,
    ) -> Result<ListResponse<Self>, ResourceError> {
        let query = params
            .map(|p| serialize_to_query(Self::NAME, &p))
            .transpose()?
            .filter(|q| !q.is_empty());

        Self::send_operation(client, ResourceOperation::List, &[], query, None, None).await
    }

    /// Fetches a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] if `id` is empty and
    /// [`ResourceError::Api`] if the call fails (e.g. `not_found`).
    async fn info(client: &HttpClient, id: &str) -> Result<Self, ResourceError> {
        Self::send_operation(
            client,
            ResourceOperation::Info,
            &[(Self::ID_PARAM, id)],
            None,
            None,
            None,
        )
        .await
    }

    /// Resolves `operation` against [`Self::PATHS`], runs it through the
    /// pipeline and deserializes the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource does
    /// not declare the operation, plus every error of the pipeline call.
    async fn send_operation<T: DeserializeOwned>(
        client: &HttpClient,
        operation: ResourceOperation,
        ids: &[(&str, &str)],
        query: Option<HashMap<String, String>>,
        body: Option<Value>,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Result<T, ResourceError> {
        let available_ids: Vec<&str> = ids.iter().map(|(name, _)| *name).collect();
        let path = get_path(Self::PATHS, operation, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: operation.as_str(),
            },
        )?;

        let mut builder = RequestDescriptor::builder(path.http_method, path.template)
            .maybe_idempotency_key(idempotency_key);
        for (name, value) in ids {
            builder = builder.path_param(*name, value);
        }
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let data = client.execute(builder.build()?).await.into_result()?;

        serde_json::from_value(data).map_err(|source| ResourceError::Deserialize {
            resource: Self::NAME,
            source,
        })
    }
}

/// Serializes a params struct to a query parameter map.
///
/// `None` fields are skipped; arrays become comma-separated values.
fn serialize_to_query<T: Serialize>(
    resource: &'static str,
    params: &T,
) -> Result<HashMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params)
        .map_err(|source| ResourceError::Serialize { resource, source })?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, Serialize, Default)]
    struct Filters {
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<String>,
        #[serde(rename = "created_at.gte", skip_serializing_if = "Option::is_none")]
        created_at_gte: Option<chrono::DateTime<Utc>>,
        test: Option<bool>,
        ids: Vec<u32>,
    }

    #[test]
    fn test_serialize_to_query_flattens_values() {
        let filters = Filters {
            limit: Some(10),
            cursor: Some("abc".to_string()),
            created_at_gte: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            test: None,
            ids: vec![1, 2],
        };

        let query = serialize_to_query("Payment", &filters).unwrap();

        assert_eq!(query.get("limit"), Some(&"10".to_string()));
        assert_eq!(query.get("cursor"), Some(&"abc".to_string()));
        assert_eq!(
            query.get("created_at.gte"),
            Some(&"2024-01-02T03:04:05Z".to_string())
        );
        assert_eq!(query.get("ids"), Some(&"1,2".to_string()));
        assert!(!query.contains_key("test"));
    }

    #[test]
    fn test_serialize_to_query_default_params_are_empty() {
        #[derive(Serialize, Default)]
        struct Empty {
            #[serde(skip_serializing_if = "Option::is_none")]
            limit: Option<u32>,
        }

        assert!(serialize_to_query("Payment", &Empty::default())
            .unwrap()
            .is_empty());
    }

    #[derive(Debug, Deserialize)]
    struct Widget {
        #[allow(dead_code)]
        id: String,
    }

    impl RestResource for Widget {
        type CreateParams = serde_json::Value;
        type ListParams = Filters;

        const NAME: &'static str = "Widget";
        const ID_PARAM: &'static str = "widget_id";
        const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
            crate::clients::HttpMethod::Get,
            ResourceOperation::Info,
            &["widget_id"],
            "/widgets/{widget_id}",
        )];
    }

    #[tokio::test]
    async fn test_undeclared_operation_fails_before_any_request() {
        let config = crate::YookassaConfig::builder()
            .shop_id(crate::ShopId::new("123456").unwrap())
            .secret_key(crate::SecretKey::new("test_secret").unwrap())
            .endpoint(crate::Endpoint::new("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let error = Widget::list(&client, None).await.unwrap_err();

        assert!(matches!(
            error,
            ResourceError::PathResolutionFailed {
                resource: "Widget",
                operation: "list"
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_before_any_request() {
        let config = crate::YookassaConfig::builder()
            .shop_id(crate::ShopId::new("123456").unwrap())
            .secret_key(crate::SecretKey::new("test_secret").unwrap())
            .endpoint(crate::Endpoint::new("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let error = Widget::info(&client, "").await.unwrap_err();

        assert!(matches!(error, ResourceError::InvalidRequest(_)));
    }
}
