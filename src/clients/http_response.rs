//! HTTP response types for the YooKassa API SDK.
//!
//! [`HttpResponse`] is what the transport hands back to the request pipeline:
//! status, headers and the raw body text. Interpreting the body (success
//! payload or error envelope) is the pipeline's job.

use std::collections::HashMap;

/// A raw HTTP response from the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The unparsed response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Parses the body as JSON for a successful response.
    ///
    /// An empty body yields an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the body is non-empty and not valid JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(&self.body)
    }

    /// Returns at most `max_chars` characters of the body for diagnostics.
    #[must_use]
    pub fn body_snippet(&self, max_chars: usize) -> String {
        let trimmed = self.body.trim();
        match trimmed.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}...", &trimmed[..end]),
            None => trimmed.to_string(),
        }
    }
}
