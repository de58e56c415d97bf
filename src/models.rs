//! Data types exchanged with the Volley API.
//!
//! Identifiers are `u64`. Fields the server may leave out (timestamps, counts,
//! optional settings) decode to their default when absent.

use serde::{Deserialize, Serialize};

/// An organization: the top-level tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: String,
}

/// A project inside an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub organization_id: u64,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// An inbound endpoint that receives webhooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    /// Public identifier used in `/hook/{ingestion_id}` URLs.
    #[serde(default)]
    pub ingestion_id: String,
    #[serde(rename = "type", default)]
    pub source_type: String,
    /// Events per second limit.
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub connection_count: u32,
    #[serde(default)]
    pub auth_type: String,
    #[serde(default)]
    pub verify_signature: bool,
    #[serde(default)]
    pub webhook_secret_set: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_key_name: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// An outbound endpoint webhooks are delivered to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A routing rule from a source to a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: u64,
    pub source_id: u64,
    pub destination_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// One ingested webhook request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub event_id: String,
    #[serde(default)]
    pub source_id: u64,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub raw_body: String,
    #[serde(default)]
    pub headers: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_attempts: Option<Vec<DeliveryAttempt>>,
    #[serde(default)]
    pub created_at: String,
}

/// One delivery try of an event over a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    pub id: u64,
    pub event_id: String,
    #[serde(default)]
    pub connection_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub created_at: String,
}

/// A page of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub requests: Vec<Event>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// A page of delivery attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDeliveryAttemptsResponse {
    pub attempts: Vec<DeliveryAttempt>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
}

/// Body for creating or updating a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSourceRequest {
    pub name: String,
    pub eps: u32,
    pub auth_type: String,
}

/// Body for creating or updating a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDestinationRequest {
    pub name: String,
    pub url: String,
    pub eps: u32,
}

/// Body for creating or updating a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateConnectionRequest {
    pub source_id: u64,
    pub destination_id: u64,
    pub status: String,
    pub eps: u32,
    pub max_retries: u32,
}

/// Replays an event, optionally to a single destination or connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEventRequest {
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<u64>,
}

impl ReplayEventRequest {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            destination_id: None,
            connection_id: None,
        }
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEventResponse {
    pub success: bool,
    pub status: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    pub duration_ms: u64,
    pub attempt_id: u64,
}
