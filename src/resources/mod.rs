//! Typed facades over the dispatcher, one per resource family.
//!
//! Each facade borrows the [`Client`] and turns its arguments into a path,
//! body and query, then unwraps the field the server nests the result under.

mod connections;
mod delivery_attempts;
mod destinations;
mod events;
mod organizations;
mod projects;
mod sources;
mod webhooks;

pub use connections::Connections;
pub use delivery_attempts::{DeliveryAttempts, ListDeliveryAttemptsOptions};
pub use destinations::Destinations;
pub use events::{Events, ListEventsOptions};
pub use organizations::Organizations;
pub use projects::Projects;
pub use sources::Sources;
pub use webhooks::Webhooks;

use crate::Client;

impl Client {
    /// Organization operations.
    pub fn organizations(&self) -> Organizations<'_> {
        Organizations::new(self)
    }

    /// Project operations.
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    /// Source operations.
    pub fn sources(&self) -> Sources<'_> {
        Sources::new(self)
    }

    /// Destination operations.
    pub fn destinations(&self) -> Destinations<'_> {
        Destinations::new(self)
    }

    /// Connection operations.
    pub fn connections(&self) -> Connections<'_> {
        Connections::new(self)
    }

    /// Event operations.
    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    /// Delivery attempt operations.
    pub fn delivery_attempts(&self) -> DeliveryAttempts<'_> {
        DeliveryAttempts::new(self)
    }

    /// Unauthenticated webhook ingestion.
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }
}

/// Appends `key` with a decimal value when `value` is present.
fn push_number(query: &mut Vec<(String, String)>, key: &str, value: Option<u64>) {
    if let Some(value) = value {
        query.push((key.to_string(), value.to_string()));
    }
}

/// Appends `key` when `value` is present and non-empty.
fn push_text(query: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        query.push((key.to_string(), value.to_string()));
    }
}
