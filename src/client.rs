//! Authenticated client and request dispatcher.
//!
//! The [`Client`] type is the main entry point. Every resource operation goes
//! through [`Client::send`], which injects the bearer credential and the
//! organization header, performs the HTTP call and normalizes any failure into
//! [`Error::Api`]. Use [`ClientBuilder`] to configure and create clients.

use crate::{
    metadata::{Method, RequestOptions},
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Production endpoint of the Volley API.
pub const DEFAULT_BASE_URL: &str = "https://api.volleyhooks.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the organization a request is scoped to.
pub const ORGANIZATION_HEADER: &str = "x-organization-id";

/// Environment variable read by [`ClientBuilder::from_env`] for the API token.
pub const API_TOKEN_ENV: &str = "VOLLEY_API_TOKEN";

/// Environment variable read by [`ClientBuilder::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "VOLLEY_BASE_URL";

/// Environment variable read by [`ClientBuilder::from_env`] for the organization.
pub const ORGANIZATION_ID_ENV: &str = "VOLLEY_ORGANIZATION_ID";

/// A client for the Volley API.
///
/// The client holds the bearer credential, the base URL and the current
/// organization. Cloning is cheap; clones share all three, including the
/// current organization.
///
/// Changing the organization while other requests are in flight is allowed,
/// but each request reads the organization when its headers are built, so
/// which value an in-flight request picks up is not defined. Use
/// [`RequestOptions::with_organization`] when a call must be scoped
/// deterministically.
///
/// # Examples
///
/// ```no_run
/// use volley::Client;
///
/// # async fn example() -> Result<(), volley::Error> {
/// let client = Client::new("my-api-token")?;
///
/// let orgs = client.organizations().list().await?;
/// if let Some(org) = orgs.first() {
///     client.set_organization(org.id);
/// }
///
/// for project in client.projects().list().await? {
///     println!("{} ({})", project.name, project.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    authorization: HeaderValue,
    default_headers: HeaderMap,
    timeout: Duration,
    organization_id: RwLock<Option<u64>>,
}

impl Client {
    /// Creates a client for the production endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `api_token` is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::builder().api_token(api_token).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the base URL all request paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Sets the organization used to scope subsequent requests.
    ///
    /// No check is made that the organization exists or is accessible; a
    /// wrong id surfaces as an authorization failure on the next request.
    pub fn set_organization(&self, organization_id: u64) {
        *self.inner.organization_id.write() = Some(organization_id);
    }

    /// Clears the current organization. Subsequent requests carry no
    /// organization header and the server picks the default organization.
    pub fn clear_organization(&self) {
        *self.inner.organization_id.write() = None;
    }

    /// Returns the current organization, if one is set.
    pub fn organization(&self) -> Option<u64> {
        *self.inner.organization_id.read()
    }

    /// Performs an authenticated request and returns the decoded payload.
    ///
    /// This is what every resource method calls. `path` is relative to the
    /// base URL and is not validated.
    ///
    /// # Errors
    ///
    /// Any failure (network, timeout, non-2xx status, undecodable body) is
    /// returned as [`Error::Api`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use volley::{Client, Method, RequestOptions};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Health { status: String }
    ///
    /// # async fn example() -> Result<(), volley::Error> {
    /// let client = Client::new("my-api-token")?;
    ///
    /// let health: Health = client
    ///     .request::<(), _>(Method::Get, "/api/health", None, RequestOptions::new())
    ///     .await?;
    /// println!("{}", health.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request<Req, Res>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
        options: RequestOptions,
    ) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.send(method, path, body, options)
            .await
            .map(Response::into_data)
    }

    /// Like [`request`](Client::request), but keeps status, headers, raw body
    /// and latency alongside the decoded payload.
    pub async fn send<Req, Res>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
        options: RequestOptions,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();
        let request = self.build_request(method, path, body, options)?;

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %method,
                    path = %path,
                    timeout = e.is_timeout(),
                    "Request failed before a response was received"
                );
                return Err(Error::from_transport(&e));
            }
        };

        self.parse_response(response, start_time).await
    }

    fn build_request<Req>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
        options: RequestOptions,
    ) -> Result<reqwest::RequestBuilder>
    where
        Req: Serialize + ?Sized,
    {
        let url = self.url_for(path, &options.query_params);

        // Read the shared organization only now, when the headers are built.
        let organization = options.organization.or_else(|| self.organization());
        let headers = self.compose_headers(&options.headers, organization)?;

        tracing::debug!(
            method = %method,
            url = %url,
            organization = ?organization,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(method.as_http(), url)
            .headers(headers)
            .timeout(self.inner.timeout);

        if let Some(body) = body {
            let json = serde_json::to_value(body)
                .map_err(|e| Error::api(format!("Failed to serialize request: {}", e), 0))?;
            request = request.json(&json);
        }

        Ok(request)
    }

    /// Builds the header set for one request.
    ///
    /// Defaults first, then caller overrides (multiple values for one name are
    /// joined with `", "`), then the bearer credential, then the organization.
    fn compose_headers(
        &self,
        overrides: &HeaderMap,
        organization: Option<u64>,
    ) -> Result<HeaderMap> {
        let mut headers = self.inner.default_headers.clone();

        for name in overrides.keys() {
            let values: Vec<&[u8]> = overrides
                .get_all(name)
                .iter()
                .map(|v| v.as_bytes())
                .collect();
            let value = HeaderValue::from_bytes(&values.join(&b", "[..]))
                .map_err(|e| Error::api(format!("Invalid header value for {}: {}", name, e), 0))?;
            headers.insert(name.clone(), value);
        }

        headers.insert(header::AUTHORIZATION, self.inner.authorization.clone());

        if let Some(organization_id) = organization {
            headers.insert(
                HeaderName::from_static(ORGANIZATION_HEADER),
                HeaderValue::from(organization_id),
            );
        }

        Ok(headers)
    }

    /// Parses the response into a typed `Response`, normalizing failures.
    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        start_time: Instant,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error"
                );
            }

            return Err(Error::from_response(status, &headers, &raw_response));
        }

        let raw_body = response.text().await.map_err(|e| Error::from_transport(&e))?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        let data = decode_body(&raw_body)?;
        Ok(Response::new(data, raw_body, status, headers, latency))
    }

    /// Resolves `path` against the base URL and appends `query` in order.
    ///
    /// A query string embedded in `path` is kept and comes before `query`.
    pub(crate) fn url_for(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.inner.base_url.clone();
        let (path, embedded_query) = match path.split_once('?') {
            Some((path, embedded)) => (path, Some(embedded)),
            None => (path, None),
        };
        let full_path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&full_path);
        url.set_query(embedded_query.filter(|q| !q.is_empty()));

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        url
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.inner.http_client
    }

    pub(crate) fn default_headers(&self) -> &HeaderMap {
        &self.inner.default_headers
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.inner.timeout
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("organization_id", &self.organization())
            .finish_non_exhaustive()
    }
}

/// Decodes a JSON body. An empty body decodes as `null`.
fn decode_body<T>(raw_body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let text = if raw_body.trim().is_empty() {
        "null"
    } else {
        raw_body
    };

    serde_json::from_str(text).map_err(|e| {
        tracing::error!(
            error = %e,
            raw_response = %raw_body,
            "Failed to decode response"
        );
        Error::from_decode(&e)
    })
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use volley::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), volley::Error> {
/// let client = ClientBuilder::new()
///     .api_token("my-api-token")
///     .base_url("https://api-staging.volleyhooks.com")?
///     .timeout(Duration::from_secs(10))
///     .organization_id(42)
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_token: Option<String>,
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Duration,
    organization_id: Option<u64>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Self {
            api_token: None,
            base_url: None,
            default_headers,
            timeout: DEFAULT_TIMEOUT,
            organization_id: None,
            http_client: None,
        }
    }

    /// Creates a builder from `VOLLEY_API_TOKEN`, `VOLLEY_BASE_URL` and
    /// `VOLLEY_ORGANIZATION_ID`. Unset variables leave the defaults in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or organization id cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            builder = builder.api_token(token);
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(url)?;
        }
        if let Ok(raw) = std::env::var(ORGANIZATION_ID_ENV) {
            let organization_id = raw.trim().parse::<u64>().map_err(|e| {
                Error::Configuration(format!("Invalid {}: {}", ORGANIZATION_ID_ENV, e))
            })?;
            builder = builder.organization_id(organization_id);
        }

        Ok(builder)
    }

    /// Sets the API token sent as `Authorization: Bearer <token>`.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the base URL for all requests. Defaults to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid base URL: {}", e)))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the organization requests are scoped to initially.
    pub fn organization_id(mut self, organization_id: u64) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Uses a preconfigured `reqwest::Client` as the HTTP engine.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is missing or empty, or if the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let api_token = self
            .api_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Configuration("API token is required".to_string()))?;

        let mut authorization = HeaderValue::try_from(format!("Bearer {}", api_token))
            .map_err(|e| Error::Configuration(format!("Invalid API token: {}", e)))?;
        authorization.set_sensitive(true);

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| Error::Configuration(format!("Invalid base URL: {}", e)))?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::Configuration(format!("Failed to build HTTP client: {}", e))
            })?,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                authorization,
                default_headers: self.default_headers,
                timeout: self.timeout,
                organization_id: RwLock::new(self.organization_id),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
