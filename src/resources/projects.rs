use crate::models::{Connection, CreateProjectRequest, Project, UpdateProjectRequest};
use crate::{Client, Method, RequestOptions, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;

#[derive(Deserialize)]
struct ProjectList {
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct ProjectEnvelope {
    project: Project,
}

#[derive(Deserialize)]
struct ConnectionList {
    connections: Vec<Connection>,
}

/// Project operations. Obtained with [`Client::projects`].
pub struct Projects<'a> {
    client: &'a Client,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the projects of the current organization.
    pub async fn list(&self) -> Result<Vec<Project>> {
        let response: ProjectList = self
            .client
            .request::<(), _>(Method::Get, "/api/projects", None, RequestOptions::new())
            .await?;
        Ok(response.projects)
    }

    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project> {
        let response: ProjectEnvelope = self
            .client
            .request(Method::Post, "/api/projects", Some(request), RequestOptions::new())
            .await?;
        Ok(response.project)
    }

    /// Renames a project.
    pub async fn update(&self, project_id: u64, request: &UpdateProjectRequest) -> Result<Project> {
        let path = format!("/api/projects/{}", project_id);
        let response: ProjectEnvelope = self
            .client
            .request(Method::Put, &path, Some(request), RequestOptions::new())
            .await?;
        Ok(response.project)
    }

    pub async fn delete(&self, project_id: u64) -> Result<()> {
        let path = format!("/api/projects/{}", project_id);
        self.client
            .request::<(), IgnoredAny>(Method::Delete, &path, None, RequestOptions::new())
            .await?;
        Ok(())
    }

    /// Lists all connections in a project.
    pub async fn connections(&self, project_id: u64) -> Result<Vec<Connection>> {
        let path = format!("/api/projects/{}/connections", project_id);
        let response: ConnectionList = self
            .client
            .request::<(), _>(Method::Get, &path, None, RequestOptions::new())
            .await?;
        Ok(response.connections)
    }
}
