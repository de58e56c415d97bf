//! Rate limit information parsed from failing responses.
//!
//! The client never waits or retries on its own. When the API answers with
//! rate limit headers, they are parsed here and attached to the returned
//! [`Error`](crate::Error) so callers can decide how long to back off.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Information extracted from rate limit headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// When the rate limit resets (from X-RateLimit-Reset or RateLimit-Reset headers).
    pub reset_at: Option<SystemTime>,

    /// How long to wait before retrying (from Retry-After header).
    pub retry_after: Option<Duration>,

    /// Number of requests remaining in the current window.
    pub remaining: Option<u64>,
}

impl RateLimitInfo {
    /// Extracts rate limit information from HTTP response headers.
    ///
    /// Parses:
    /// - `Retry-After` (seconds or HTTP date)
    /// - `X-RateLimit-Reset` / `RateLimit-Reset` (Unix timestamp)
    /// - `X-RateLimit-Remaining`
    ///
    /// # Examples
    ///
    /// ```
    /// use volley::rate_limit::RateLimitInfo;
    /// use http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("retry-after", "60".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers);
    /// assert!(info.retry_after.is_some());
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            reset_at: parse_rate_limit_reset(headers),
            retry_after: parse_retry_after(headers),
            remaining: parse_rate_limit_remaining(headers),
        }
    }

    /// Returns the suggested wait before the next request, capped at `max_wait`.
    ///
    /// Prefers `retry_after`, then the time remaining until `reset_at`.
    pub fn delay(&self, max_wait: Duration) -> Option<Duration> {
        if let Some(retry_after) = self.retry_after {
            return Some(retry_after.min(max_wait));
        }

        let until_reset = self.reset_at?.duration_since(SystemTime::now()).ok()?;
        Some(until_reset.min(max_wait))
    }

    /// Returns `true` if the headers describe an active rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.retry_after.is_some() || self.remaining == Some(0)
    }
}

/// Parses the Retry-After header as delay-seconds or an HTTP date.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get("retry-after")?.to_str().ok()?;

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date_time = httpdate::parse_http_date(header).ok()?;
    date_time.duration_since(SystemTime::now()).ok()
}

fn parse_rate_limit_reset(headers: &HeaderMap) -> Option<SystemTime> {
    ["x-ratelimit-reset", "ratelimit-reset"]
        .iter()
        .find_map(|name| {
            let timestamp = headers.get(*name)?.to_str().ok()?.parse::<u64>().ok()?;
            Some(UNIX_EPOCH + Duration::from_secs(timestamp))
        })
}

fn parse_rate_limit_remaining(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
