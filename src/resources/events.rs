use super::{push_number, push_text};
use crate::models::{Event, ListEventsResponse, ReplayEventRequest, ReplayEventResponse};
use crate::{Client, Method, RequestOptions, Result};
use serde::Deserialize;

/// Filters for [`Events::list`]. Unset fields are not sent.
///
/// # Examples
///
/// ```
/// use volley::resources::ListEventsOptions;
///
/// let options = ListEventsOptions {
///     status: Some("failed".to_string()),
///     limit: Some(50),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEventsOptions {
    pub source_id: Option<u64>,
    pub connection_id: Option<u64>,
    pub destination_id: Option<u64>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListEventsOptions {
    fn query_params(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_number(&mut query, "source_id", self.source_id);
        push_number(&mut query, "connection_id", self.connection_id);
        push_number(&mut query, "destination_id", self.destination_id);
        push_text(&mut query, "status", self.status.as_deref());
        push_text(&mut query, "start_time", self.start_time.as_deref());
        push_text(&mut query, "end_time", self.end_time.as_deref());
        push_text(&mut query, "search", self.search.as_deref());
        push_number(&mut query, "limit", self.limit);
        push_number(&mut query, "offset", self.offset);
        query
    }
}

#[derive(Deserialize)]
struct EventEnvelope {
    request: Event,
}

/// Event operations. Obtained with [`Client::events`].
pub struct Events<'a> {
    client: &'a Client,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the events of a project, newest first, filtered by `options`.
    pub async fn list(
        &self,
        project_id: u64,
        options: &ListEventsOptions,
    ) -> Result<ListEventsResponse> {
        let path = format!("/api/projects/{}/requests", project_id);
        let options = RequestOptions::new().with_query_params(options.query_params());
        self.client
            .request::<(), _>(Method::Get, &path, None, options)
            .await
    }

    /// Gets an event by its numeric id (not its `event_id` string).
    pub async fn get(&self, request_id: u64) -> Result<Event> {
        let path = format!("/api/requests/{}", request_id);
        let response: EventEnvelope = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.request)
    }

    /// Replays an event by its `event_id`.
    pub async fn replay(&self, request: &ReplayEventRequest) -> Result<ReplayEventResponse> {
        self.client
            .request(Method::Post, "/api/replay-event", Some(request), RequestOptions::new())
            .await
    }
}
