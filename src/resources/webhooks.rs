use crate::error::message_from_body;
use crate::{Client, Error, Result, ORGANIZATION_HEADER};
use http::header;
use serde::Serialize;
use serde_json::Value;

/// Webhook ingestion. Obtained with [`Client::webhooks`].
///
/// Ingestion is public: requests sent from here carry neither the bearer
/// credential nor the organization header, and failures are reported as
/// [`Error::Webhook`] with the status code embedded in the message.
pub struct Webhooks<'a> {
    client: &'a Client,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Sends `payload` to the source with the given ingestion id and returns
    /// the id of the queued event.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use volley::Client;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), volley::Error> {
    /// let client = Client::new("my-api-token")?;
    ///
    /// let event_id = client
    ///     .webhooks()
    ///     .send("src_abc123", &json!({"event": "user.created"}))
    ///     .await?;
    /// println!("Queued as {}", event_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send<P>(&self, ingestion_id: &str, payload: &P) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let url = self.client.url_for(&format!("/hook/{}", ingestion_id), &[]);

        tracing::debug!(url = %url, "Sending webhook");

        let mut headers = self.client.default_headers().clone();
        headers.remove(header::AUTHORIZATION);
        headers.remove(ORGANIZATION_HEADER);

        let response = self
            .client
            .http_client()
            .post(url)
            .headers(headers)
            .timeout(self.client.timeout())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    "Webhook request failed before a response was received"
                );
                let status = e.status().map(|s| s.as_u16()).unwrap_or(0);
                Error::webhook(Some(e.to_string()), status)
            })?;

        let status = response.status();
        let raw_body = response
            .text()
            .await
            .map_err(|e| Error::webhook(Some(e.to_string()), status.as_u16()))?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                response = %raw_body,
                "Webhook rejected"
            );
            let message = message_from_body(&raw_body)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
            return Err(Error::webhook(Some(message), status.as_u16()));
        }

        event_id_from_body(&raw_body)
            .ok_or_else(|| Error::Webhook("No event_id in response".to_string()))
    }
}

/// Reads `event_id` from an ingestion response. Numeric ids are rendered as
/// decimal strings. An empty string or `0` counts as missing.
fn event_id_from_body(raw_body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw_body).ok()?;
    match value.get("event_id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    }
}
