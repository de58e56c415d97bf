//! Request descriptor types.
//!
//! A request is described by a [`Method`], a server-relative path, an optional
//! body and optional [`RequestOptions`] carrying caller-level overrides.

use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

/// HTTP methods used by the Volley API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub(crate) fn as_http(self) -> http::Method {
        match self {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_http().as_str())
    }
}

/// Caller-supplied overrides for a single request.
///
/// Headers set here are sent as-is, except `Authorization`, which the client
/// always overwrites with its bearer credential. Query parameters keep their
/// insertion order.
///
/// # Examples
///
/// ```
/// use volley::RequestOptions;
///
/// let options = RequestOptions::new()
///     .with_query_param("status", "failed")
///     .with_query_param("limit", "50")
///     .with_organization(42);
///
/// assert_eq!(options.query_params.len(), 2);
/// assert_eq!(options.organization, Some(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// Query parameters for this request, in order.
    pub query_params: Vec<(String, String)>,

    /// Organization to scope this request to.
    ///
    /// When `None`, the client's current organization (if any) is used.
    pub organization: Option<u64>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref()).map_err(|e| {
            crate::Error::Configuration(format!("Invalid header name: {}", e))
        })?;
        let value = HeaderValue::try_from(value.as_ref()).map_err(|e| {
            crate::Error::Configuration(format!("Invalid header value: {}", e))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a multi-valued header, sent as a single value joined with `", "`.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or joined value is invalid.
    pub fn with_header_values<I, V>(
        self,
        name: impl AsRef<str>,
        values: I,
    ) -> Result<Self, crate::Error>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.with_header(name, joined)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_query_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query_params.extend(params);
        self
    }

    /// Scopes this request to `organization_id`, regardless of the client's
    /// current organization.
    pub fn with_organization(mut self, organization_id: u64) -> Self {
        self.organization = Some(organization_id);
        self
    }
}
