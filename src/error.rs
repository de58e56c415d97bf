//! Error types for Volley API calls.
//!
//! Every failure that crosses the request dispatcher is normalized into
//! [`Error::Api`], which carries a human-readable message and a numeric status
//! code. A status code of `0` means no HTTP status was available: the request
//! never got a response (DNS, connect, timeout) or the response body could not
//! be decoded into the expected shape.

use crate::rate_limit::RateLimitInfo;
use http::{HeaderMap, StatusCode};
use serde_json::Value;

/// Message used when a failure carries no better description.
pub(crate) const FALLBACK_MESSAGE: &str = "Request failed";

/// Message used by the webhook ingestion path when nothing better is available.
pub(crate) const WEBHOOK_FALLBACK_MESSAGE: &str = "Webhook request failed";

/// The error type for Volley API calls.
///
/// # Examples
///
/// ```no_run
/// use volley::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("my-api-token")?;
///
/// match client.projects().list().await {
///     Ok(projects) => println!("{} projects", projects.len()),
///     Err(e) if e.is_unauthorized() => eprintln!("Check your API token"),
///     Err(e) => eprintln!("Request failed ({}): {}", e.status_code(), e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// A request through the authenticated dispatcher failed.
    ///
    /// This is the normalized failure shape: transport errors, non-2xx
    /// responses and decode failures all end up here.
    #[error("{message}")]
    Api {
        /// Human-readable description, taken from the response body when the
        /// server provided one.
        message: String,
        /// HTTP status code, or `0` when no response was received or the
        /// body could not be decoded.
        status_code: u16,
        /// Rate limit headers found on the failing response, if any.
        rate_limit_info: Option<RateLimitInfo>,
    },

    /// Invalid configuration was provided.
    ///
    /// Returned while building a client or request options, never by a
    /// request in flight.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Sending a webhook through the unauthenticated ingestion endpoint failed.
    ///
    /// The status code is embedded in the message as `(Status: <code>)`.
    #[error("{0}")]
    Webhook(String),
}

impl Error {
    /// Builds a normalized failure from a message and status code.
    pub fn api(message: impl Into<String>, status_code: u16) -> Self {
        Error::Api {
            message: message.into(),
            status_code,
            rate_limit_info: None,
        }
    }

    /// Normalizes a non-2xx response.
    ///
    /// The message is the first present of the body's `error` field, the
    /// body's `message` field, or a generic description of the status.
    pub(crate) fn from_response(status: StatusCode, headers: &HeaderMap, raw_body: &str) -> Self {
        let message = message_from_body(raw_body).unwrap_or_else(|| {
            format!("{} with status code {}", FALLBACK_MESSAGE, status.as_u16())
        });

        let rate_limit_info = Some(RateLimitInfo::from_headers(headers)).filter(|info| {
            info.is_rate_limited() || status == StatusCode::TOO_MANY_REQUESTS
        });

        Error::Api {
            message,
            status_code: status.as_u16(),
            rate_limit_info,
        }
    }

    /// Normalizes a transport failure.
    ///
    /// Connection, DNS and timeout failures have no response and map to
    /// status `0`.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
        Error::api(describe(err.to_string()), status_code)
    }

    /// Normalizes a failure to decode a successful response body.
    pub(crate) fn from_decode(err: &serde_json::Error) -> Self {
        Error::api(format!("Failed to decode response: {}", err), 0)
    }

    /// Builds a webhook failure with the status code embedded in the text.
    pub(crate) fn webhook(message: Option<String>, status_code: u16) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| WEBHOOK_FALLBACK_MESSAGE.to_string());
        Error::Webhook(format!("{} (Status: {})", message, status_code))
    }

    /// Returns the HTTP status code, or `0` when none is available.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Api { status_code, .. } => *status_code,
            _ => 0,
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Error::Api { message, .. } => message,
            Error::Configuration(message) => message,
            Error::Webhook(message) => message,
        }
    }

    /// Returns rate limit information if the failing response carried any.
    pub fn rate_limit_info(&self) -> Option<&RateLimitInfo> {
        match self {
            Error::Api {
                rate_limit_info, ..
            } => rate_limit_info.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` for a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == 401
    }

    /// Returns `true` for a 403 response.
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == 403
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }

    /// Returns `true` for a 429 response.
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == 429
    }
}

/// Extracts the server's explanation from an error body.
///
/// Looks at the `error` field first, then `message`. Empty strings count as
/// absent. Non-JSON bodies yield `None`.
pub(crate) fn message_from_body(raw_body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw_body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| match value.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
}

fn describe(description: String) -> String {
    if description.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        description
    }
}

/// A specialized `Result` type for Volley API calls.
pub type Result<T> = std::result::Result<T, Error>;
