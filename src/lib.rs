//! # Volley - client for the Volley webhook delivery API
//!
//! Volley receives webhooks on *sources*, routes them through *connections*
//! and delivers them to *destinations*, all grouped in *projects* that belong
//! to an *organization*. This crate wraps the management API with typed,
//! async methods built on `reqwest`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use volley::Client;
//! use volley::models::CreateProjectRequest;
//! use volley::resources::ListEventsOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), volley::Error> {
//!     let client = Client::new(std::env::var("VOLLEY_API_TOKEN").unwrap_or_default())?;
//!
//!     // Scope subsequent requests to the first organization
//!     let orgs = client.organizations().list().await?;
//!     if let Some(org) = orgs.first() {
//!         client.set_organization(org.id);
//!     }
//!
//!     let project = client
//!         .projects()
//!         .create(&CreateProjectRequest {
//!             name: "Billing".to_string(),
//!             is_default: None,
//!         })
//!         .await?;
//!
//!     let failed = client
//!         .events()
//!         .list(
//!             project.id,
//!             &ListEventsOptions {
//!                 status: Some("failed".to_string()),
//!                 limit: Some(10),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("{} failed events", failed.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Organization scope
//!
//! The client keeps a current organization that is sent as
//! `X-Organization-ID` on every authenticated request. Set it with
//! [`Client::set_organization`], remove it with [`Client::clear_organization`].
//! For a single call scoped to another organization, pass
//! [`RequestOptions::with_organization`] to [`Client::request`] instead.
//!
//! ## Error Handling
//!
//! Every failed API call returns [`Error::Api`] with a message and a status
//! code. The status is `0` when no response was received (network error,
//! timeout) or the body could not be decoded:
//!
//! ```no_run
//! use volley::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("my-api-token")?;
//! match client.sources().get(42).await {
//!     Ok(source) => println!("Ingest at /hook/{}", source.ingestion_id),
//!     Err(e) if e.is_not_found() => println!("No such source"),
//!     Err(e) if e.is_rate_limited() => {
//!         let max_wait = std::time::Duration::from_secs(60);
//!         let wait = e.rate_limit_info().and_then(|i| i.delay(max_wait));
//!         println!("Rate limited, retry in {:?}", wait);
//!     }
//!     Err(e) => println!("Failed ({}): {}", e.status_code(), e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client never retries on its own.

mod client;
mod error;
pub mod metadata;
pub mod models;
pub mod rate_limit;
pub mod resources;
mod response;

pub use client::{
    Client, ClientBuilder, API_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
    ORGANIZATION_HEADER, ORGANIZATION_ID_ENV,
};
pub use error::{Error, Result};
pub use metadata::{Method, RequestOptions};
pub use response::Response;
