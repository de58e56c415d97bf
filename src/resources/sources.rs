use crate::models::{CreateSourceRequest, Source};
use crate::{Client, Method, RequestOptions, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;

#[derive(Deserialize)]
struct SourceList {
    sources: Vec<Source>,
}

#[derive(Deserialize)]
struct SourceEnvelope {
    source: Source,
}

/// Source operations. Obtained with [`Client::sources`].
pub struct Sources<'a> {
    client: &'a Client,
}

impl<'a> Sources<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, project_id: u64) -> Result<Vec<Source>> {
        let path = format!("/api/projects/{}/sources", project_id);
        let response: SourceList = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.sources)
    }

    pub async fn create(&self, project_id: u64, request: &CreateSourceRequest) -> Result<Source> {
        let path = format!("/api/projects/{}/sources", project_id);
        self.write(Method::Post, &path, request).await
    }

    pub async fn get(&self, source_id: u64) -> Result<Source> {
        let path = format!("/api/sources/{}", source_id);
        let response: SourceEnvelope = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.source)
    }

    pub async fn update(&self, source_id: u64, request: &CreateSourceRequest) -> Result<Source> {
        let path = format!("/api/sources/{}", source_id);
        self.write(Method::Put, &path, request).await
    }

    pub async fn delete(&self, source_id: u64) -> Result<()> {
        let path = format!("/api/sources/{}", source_id);
        self.client
            .request::<(), IgnoredAny>(Method::Delete, &path, None, RequestOptions::new())
            .await?;
        Ok(())
    }

    async fn write(
        &self,
        method: Method,
        path: &str,
        request: &CreateSourceRequest,
    ) -> Result<Source> {
        let response: SourceEnvelope = self
            .client
            .request(method, path, Some(request), RequestOptions::new())
            .await?;
        Ok(response.source)
    }
}
