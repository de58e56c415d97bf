use crate::models::{CreateOrganizationRequest, Organization};
use crate::{Client, Method, RequestOptions, Result};
use serde::Deserialize;

#[derive(Deserialize)]
struct OrganizationList {
    organizations: Vec<Organization>,
}

/// Organization operations. Obtained with [`Client::organizations`].
pub struct Organizations<'a> {
    client: &'a Client,
}

impl<'a> Organizations<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all organizations the token has access to.
    pub async fn list(&self) -> Result<Vec<Organization>> {
        let response: OrganizationList = self
            .client
            .request::<(), _>(Method::Get, "/api/org/list", None, RequestOptions::new())
            .await?;
        Ok(response.organizations)
    }

    /// Gets an organization.
    ///
    /// With `Some(id)`, this one request is scoped to `id`; the client's
    /// current organization is left untouched. With `None`, the current
    /// organization (or the server's default) is used.
    pub async fn get(&self, organization_id: Option<u64>) -> Result<Organization> {
        let options = RequestOptions {
            organization: organization_id,
            ..RequestOptions::new()
        };
        self.client
            .request::<(), _>(Method::Get, "/api/org", None, options)
            .await
    }

    /// Creates an organization.
    pub async fn create(&self, request: &CreateOrganizationRequest) -> Result<Organization> {
        self.client
            .request(Method::Post, "/api/org", Some(request), RequestOptions::new())
            .await
    }
}
