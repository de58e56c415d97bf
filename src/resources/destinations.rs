use crate::models::{CreateDestinationRequest, Destination};
use crate::{Client, Method, RequestOptions, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;

#[derive(Deserialize)]
struct DestinationList {
    destinations: Vec<Destination>,
}

#[derive(Deserialize)]
struct DestinationEnvelope {
    destination: Destination,
}

/// Destination operations. Obtained with [`Client::destinations`].
pub struct Destinations<'a> {
    client: &'a Client,
}

impl<'a> Destinations<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, project_id: u64) -> Result<Vec<Destination>> {
        let path = format!("/api/projects/{}/destinations", project_id);
        let response: DestinationList = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.destinations)
    }

    pub async fn create(
        &self,
        project_id: u64,
        request: &CreateDestinationRequest,
    ) -> Result<Destination> {
        let path = format!("/api/projects/{}/destinations", project_id);
        let response: DestinationEnvelope = self
            .client
            .request(Method::Post, &path, Some(request), RequestOptions::new())
            .await?;
        Ok(response.destination)
    }

    pub async fn get(&self, destination_id: u64) -> Result<Destination> {
        let path = format!("/api/destinations/{}", destination_id);
        let response: DestinationEnvelope = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.destination)
    }

    pub async fn update(
        &self,
        destination_id: u64,
        request: &CreateDestinationRequest,
    ) -> Result<Destination> {
        let path = format!("/api/destinations/{}", destination_id);
        let response: DestinationEnvelope = self
            .client
            .request(Method::Put, &path, Some(request), RequestOptions::new())
            .await?;
        Ok(response.destination)
    }

    pub async fn delete(&self, destination_id: u64) -> Result<()> {
        let path = format!("/api/destinations/{}", destination_id);
        self.client
            .request::<(), IgnoredAny>(Method::Delete, &path, None, RequestOptions::new())
            .await?;
        Ok(())
    }
}
