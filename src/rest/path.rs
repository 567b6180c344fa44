//! Path table infrastructure for REST resources.
//!
//! Every resource declares the endpoints it supports as a constant table of
//! [`ResourcePath`] entries. An operation is resolved by picking the entry
//! for that operation whose path parameters are all available.
//!
//! # Example
//!
//! ```rust
//! use yookassa_api::rest::{ResourcePath, ResourceOperation, get_path};
//! use yookassa_api::clients::HttpMethod;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/payments"),
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Info,
//!         &["payment_id"],
//!         "/payments/{payment_id}",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Info, &["payment_id"]);
//! assert_eq!(path.unwrap().template, "/payments/{payment_id}");
//! ```

use crate::clients::HttpMethod;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create a new resource (POST /resources).
    Create,
    /// List resources (GET /resources).
    List,
    /// Fetch a single resource by ID (GET /resources/{id}).
    Info,
    /// Capture an authorized payment (POST /payments/{id}/capture).
    Capture,
    /// Cancel an authorized payment (POST /payments/{id}/cancel).
    Cancel,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Info => HttpMethod::Get,
            Self::Create | Self::Capture | Self::Cancel => HttpMethod::Post,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Info => "info",
            Self::Capture => "capture",
            Self::Cancel => "cancel",
        }
    }
}

/// One endpoint of a REST resource.
///
/// Templates use `{name}` placeholders, e.g. `/refunds/{refund_id}`; `ids`
/// lists the placeholder names in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required path parameters in order (e.g., `["payment_id"]`).
    pub ids: &'static [&'static str],
    /// The path template, relative to the API root.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` so paths can be declared as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required path parameters.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required path parameters are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose parameters are all in
/// `available_ids`, the one with the most parameters wins.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: &[ResourcePath] = &[
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
    ];

    #[test]
    fn test_get_path_filters_by_operation() {
        let create = get_path(PATHS, ResourceOperation::Create, &[]).unwrap();
        assert_eq!(create.http_method, HttpMethod::Post);
        assert_eq!(create.template, "/payments");

        let list = get_path(PATHS, ResourceOperation::List, &[]).unwrap();
        assert_eq!(list.http_method, HttpMethod::Get);

        let capture = get_path(PATHS, ResourceOperation::Capture, &["payment_id"]).unwrap();
        assert_eq!(capture.template, "/payments/{payment_id}/capture");
    }

    #[test]
    fn test_get_path_returns_none_when_no_match() {
        // Operation not declared
        assert!(get_path(PATHS, ResourceOperation::Cancel, &["payment_id"]).is_none());

        // Missing required ID
        assert!(get_path(PATHS, ResourceOperation::Info, &[]).is_none());
    }

    #[test]
    fn test_get_path_selects_most_specific_path() {
        const NESTED: &[ResourcePath] = &[
            ResourcePath::new(HttpMethod::Get, ResourceOperation::Info, &["id"], "/things/{id}"),
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::Info,
                &["parent_id", "id"],
                "/parents/{parent_id}/things/{id}",
            ),
        ];

        let path = get_path(NESTED, ResourceOperation::Info, &["parent_id", "id"]).unwrap();
        assert_eq!(path.template, "/parents/{parent_id}/things/{id}");

        let path = get_path(NESTED, ResourceOperation::Info, &["id"]).unwrap();
        assert_eq!(path.template, "/things/{id}");
    }

    #[test]
    fn test_resource_operation_default_http_method() {
        assert_eq!(ResourceOperation::Info.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::List.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Create.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Capture.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Cancel.default_http_method(), HttpMethod::Post);
    }

    #[test]
    fn test_resource_path_matches_ids() {
        let path = PATHS[2];
        assert!(path.matches_ids(&["payment_id"]));
        assert!(path.matches_ids(&["payment_id", "extra"]));
        assert!(!path.matches_ids(&[]));
        assert_eq!(path.id_count(), 1);
    }
}
