use super::{push_number, push_text};
use crate::models::ListDeliveryAttemptsResponse;
use crate::{Client, Method, RequestOptions, Result};

/// Filters for [`DeliveryAttempts::list`]. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDeliveryAttemptsOptions {
    pub event_id: Option<String>,
    pub source_id: Option<u64>,
    pub destination_id: Option<u64>,
    pub connection_id: Option<u64>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Sort order understood by the server, e.g. `created_at_desc`.
    pub sort: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListDeliveryAttemptsOptions {
    fn query_params(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_text(&mut query, "event_id", self.event_id.as_deref());
        push_number(&mut query, "source_id", self.source_id);
        push_number(&mut query, "destination_id", self.destination_id);
        push_number(&mut query, "connection_id", self.connection_id);
        push_text(&mut query, "status", self.status.as_deref());
        push_text(&mut query, "start_time", self.start_time.as_deref());
        push_text(&mut query, "end_time", self.end_time.as_deref());
        push_text(&mut query, "sort", self.sort.as_deref());
        push_number(&mut query, "limit", self.limit);
        push_number(&mut query, "offset", self.offset);
        query
    }
}

/// Delivery attempt operations. Obtained with [`Client::delivery_attempts`].
pub struct DeliveryAttempts<'a> {
    client: &'a Client,
}

impl<'a> DeliveryAttempts<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the delivery attempts of a project, filtered by `options`.
    pub async fn list(
        &self,
        project_id: u64,
        options: &ListDeliveryAttemptsOptions,
    ) -> Result<ListDeliveryAttemptsResponse> {
        let path = format!("/api/projects/{}/delivery-attempts", project_id);
        let options = RequestOptions::new().with_query_params(options.query_params());
        self.client
            .request::<(), _>(Method::Get, &path, None, options)
            .await
    }
}
