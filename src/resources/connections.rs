use crate::models::{Connection, CreateConnectionRequest};
use crate::{Client, Method, RequestOptions, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;

#[derive(Deserialize)]
struct ConnectionEnvelope {
    connection: Connection,
}

/// Connection operations. Obtained with [`Client::connections`].
///
/// Connections of a project are listed with
/// [`Projects::connections`](crate::resources::Projects::connections).
pub struct Connections<'a> {
    client: &'a Client,
}

impl<'a> Connections<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Connects a source to a destination.
    pub async fn create(
        &self,
        project_id: u64,
        request: &CreateConnectionRequest,
    ) -> Result<Connection> {
        let path = format!("/api/projects/{}/connections", project_id);
        self.write(Method::Post, &path, request).await
    }

    /// Gets a connection with its metrics.
    pub async fn get(&self, connection_id: u64) -> Result<Connection> {
        let path = format!("/api/connections/{}", connection_id);
        let response: ConnectionEnvelope = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.connection)
    }

    pub async fn update(
        &self,
        connection_id: u64,
        request: &CreateConnectionRequest,
    ) -> Result<Connection> {
        let path = format!("/api/connections/{}", connection_id);
        self.write(Method::Put, &path, request).await
    }

    pub async fn delete(&self, connection_id: u64) -> Result<()> {
        let path = format!("/api/connections/{}", connection_id);
        self.client
            .request::<(), IgnoredAny>(Method::Delete, &path, None, RequestOptions::new())
            .await?;
        Ok(())
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        request: &CreateConnectionRequest,
    ) -> Result<Connection> {
        let response: ConnectionEnvelope = self
            .client
            .request(method, path, Some(request), RequestOptions::new())
            .await?;
        Ok(response.connection)
    }
}
