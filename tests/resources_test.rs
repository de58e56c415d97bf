//! Endpoint-level tests for the resource facades.

use serde_json::json;
use volley::models::{
    CreateConnectionRequest, CreateDestinationRequest, CreateOrganizationRequest,
    CreateProjectRequest, CreateSourceRequest, ReplayEventRequest, UpdateProjectRequest,
};
use volley::resources::{ListDeliveryAttemptsOptions, ListEventsOptions};
use volley::{Client, Error};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn setup() -> (MockServer, Client) {
    let mock_server = MockServer::start().await;
    let client = Client::builder()
        .api_token("test-token")
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();
    (mock_server, client)
}

fn query_pairs(request: &Request) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn project_json(id: u64, name: &str, is_default: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "organization_id": 1,
        "is_default": is_default,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_list_organizations_unwraps_array() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/org/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [
                {
                    "id": 1,
                    "name": "Test Org",
                    "slug": "test-org",
                    "account_id": 100,
                    "role": "owner",
                    "created_at": "2024-01-01T00:00:00Z"
                },
                {
                    "id": 2,
                    "name": "Other Org",
                    "slug": "other-org",
                    "account_id": 100,
                    "role": "member",
                    "created_at": "2024-02-01T00:00:00Z"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let orgs = client.organizations().list().await.unwrap();

    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0].id, 1);
    assert_eq!(orgs[0].name, "Test Org");
    assert_eq!(orgs[0].account_id, 100);
    assert_eq!(orgs[1].role, "member");
}

#[tokio::test]
async fn test_list_organizations_unauthorized() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/org/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "unauthorized"})))
        .mount(&mock_server)
        .await;

    let err = client.organizations().list().await.unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.message(), "unauthorized");
}

#[tokio::test]
async fn test_get_organization_scopes_single_call() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 123,
            "name": "Test Org",
            "slug": "test-org",
            "role": "owner"
        })))
        .mount(&mock_server)
        .await;

    // Prior value absent
    let org = client.organizations().get(Some(123)).await.unwrap();
    assert_eq!(org.id, 123);
    assert_eq!(client.organization(), None);

    // Prior value zero
    client.set_organization(0);
    client.organizations().get(Some(123)).await.unwrap();
    assert_eq!(client.organization(), Some(0));

    // No explicit id falls back to the current organization
    client.set_organization(7);
    client.organizations().get(None).await.unwrap();
    assert_eq!(client.organization(), Some(7));

    let requests = mock_server.received_requests().await.unwrap();
    let sent: Vec<Option<&str>> = requests
        .iter()
        .map(|r| r.headers.get("x-organization-id").and_then(|v| v.to_str().ok()))
        .collect();
    assert_eq!(sent, vec![Some("123"), Some("123"), Some("7")]);
}

#[tokio::test]
async fn test_get_organization_failure_leaves_context() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/org"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .mount(&mock_server)
        .await;

    client.set_organization(5);
    let err = client.organizations().get(Some(9)).await.unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(client.organization(), Some(5));
}

#[tokio::test]
async fn test_create_organization() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/org"))
        .and(body_json(json!({"name": "New Organization"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 2,
            "name": "New Organization",
            "slug": "new-organization",
            "account_id": 100,
            "role": "owner",
            "created_at": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let org = client
        .organizations()
        .create(&CreateOrganizationRequest {
            name: "New Organization".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(org.id, 2);
    assert_eq!(org.slug, "new-organization");
}

#[tokio::test]
async fn test_list_projects() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [project_json(1, "Default", true), project_json(2, "Billing", false)]
        })))
        .mount(&mock_server)
        .await;

    let projects = client.projects().list().await.unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects[0].is_default);
    assert_eq!(projects[1].name, "Billing");
}

#[tokio::test]
async fn test_create_project_sends_literal_fields() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(body_json(json!({"name": "X", "is_default": false})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"project": project_json(3, "X", false)})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = client
        .projects()
        .create(&CreateProjectRequest {
            name: "X".to_string(),
            is_default: Some(false),
        })
        .await
        .unwrap();

    assert_eq!(project.id, 3);
    assert_eq!(project.name, "X");
    assert!(!project.is_default);
}

#[tokio::test]
async fn test_update_delete_and_list_project_connections() {
    let (mock_server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/projects/3"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"project": project_json(3, "Renamed", false)})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/projects/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/projects/3/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": [
                {
                    "id": 8,
                    "source_id": 1,
                    "destination_id": 2,
                    "status": "active",
                    "eps": 5,
                    "max_retries": 3
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = client
        .projects()
        .update(
            3,
            &UpdateProjectRequest {
                name: "Renamed".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(project.name, "Renamed");

    let connections = client.projects().connections(3).await.unwrap();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].max_retries, 3);

    client.projects().delete(3).await.unwrap();
}

#[tokio::test]
async fn test_delete_not_found() {
    let (mock_server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/projects/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "project not found"})),
        )
        .mount(&mock_server)
        .await;

    let err = client.projects().delete(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "project not found");
}

#[tokio::test]
async fn test_source_lifecycle() {
    let (mock_server, client) = setup().await;

    let source = json!({
        "id": 11,
        "slug": "stripe",
        "ingestion_id": "src_abc123",
        "type": "webhook",
        "eps": 10,
        "status": "active",
        "connection_count": 0,
        "auth_type": "none",
        "verify_signature": false,
        "webhook_secret_set": false,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    });
    let request_body = json!({"name": "stripe", "eps": 10, "auth_type": "none"});

    Mock::given(method("GET"))
        .and(path("/api/projects/4/sources"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"sources": [source.clone()]})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/projects/4/sources"))
        .and(body_json(request_body.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"source": source.clone()})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sources/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"source": source.clone()})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/sources/11"))
        .and(body_json(request_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"source": source})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/sources/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CreateSourceRequest {
        name: "stripe".to_string(),
        eps: 10,
        auth_type: "none".to_string(),
    };
    let sources = client.sources().list(4).await.unwrap();
    assert_eq!(sources[0].ingestion_id, "src_abc123");

    let created = client.sources().create(4, &request).await.unwrap();
    assert_eq!(created.source_type, "webhook");

    let fetched = client.sources().get(11).await.unwrap();
    assert_eq!(fetched, created);

    client.sources().update(11, &request).await.unwrap();
    client.sources().delete(11).await.unwrap();
}

#[tokio::test]
async fn test_destination_lifecycle() {
    let (mock_server, client) = setup().await;

    let destination = json!({
        "id": 21,
        "name": "billing-service",
        "url": "https://billing.example.com/hooks",
        "eps": 5,
        "status": "active"
    });
    let request_body = json!({
        "name": "billing-service",
        "url": "https://billing.example.com/hooks",
        "eps": 5
    });

    Mock::given(method("GET"))
        .and(path("/api/projects/4/destinations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"destinations": [destination.clone()]})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/projects/4/destinations"))
        .and(body_json(request_body.clone()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"destination": destination.clone()})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/destinations/21"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"destination": destination.clone()})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/destinations/21"))
        .and(body_json(request_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"destination": destination})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/destinations/21"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CreateDestinationRequest {
        name: "billing-service".to_string(),
        url: "https://billing.example.com/hooks".to_string(),
        eps: 5,
    };

    assert_eq!(client.destinations().list(4).await.unwrap().len(), 1);
    let created = client.destinations().create(4, &request).await.unwrap();
    assert_eq!(created.url, "https://billing.example.com/hooks");
    assert_eq!(client.destinations().get(21).await.unwrap().id, 21);
    client.destinations().update(21, &request).await.unwrap();
    client.destinations().delete(21).await.unwrap();
}

#[tokio::test]
async fn test_connection_lifecycle() {
    let (mock_server, client) = setup().await;

    let connection = json!({
        "id": 31,
        "source_id": 11,
        "destination_id": 21,
        "status": "active",
        "eps": 5,
        "max_retries": 3
    });
    let request_body = json!({
        "source_id": 11,
        "destination_id": 21,
        "status": "active",
        "eps": 5,
        "max_retries": 3
    });

    Mock::given(method("POST"))
        .and(path("/api/projects/4/connections"))
        .and(body_json(request_body.clone()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"connection": connection.clone()})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/connections/31"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"connection": connection.clone()})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/connections/31"))
        .and(body_json(request_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connection": connection})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/connections/31"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CreateConnectionRequest {
        source_id: 11,
        destination_id: 21,
        status: "active".to_string(),
        eps: 5,
        max_retries: 3,
    };

    let created = client.connections().create(4, &request).await.unwrap();
    assert_eq!(created.id, 31);
    assert_eq!(client.connections().get(31).await.unwrap().source_id, 11);
    client.connections().update(31, &request).await.unwrap();
    client.connections().delete(31).await.unwrap();
}

#[tokio::test]
async fn test_list_events_sends_only_given_filters() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/requests"))
        .and(query_param("status", "failed"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [
                {
                    "id": 1,
                    "event_id": "evt_abc123",
                    "source_id": 10,
                    "status": "failed",
                    "created_at": "2024-01-01T00:00:00Z"
                }
            ],
            "total": 1,
            "limit": 50,
            "offset": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let events = client
        .events()
        .list(
            1,
            &ListEventsOptions {
                status: Some("failed".to_string()),
                limit: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(events.total, 1);
    assert_eq!(events.requests.len(), 1);
    assert_eq!(events.requests[0].event_id, "evt_abc123");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        query_pairs(&requests[0]),
        vec![
            ("status".to_string(), "failed".to_string()),
            ("limit".to_string(), "50".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_list_events_without_filters_has_no_query() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [],
            "total": 0,
            "limit": 50,
            "offset": 0
        })))
        .mount(&mock_server)
        .await;

    client
        .events()
        .list(1, &ListEventsOptions::default())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_get_event() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/requests/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request": {
                "id": 123,
                "event_id": "evt_abc123",
                "source_id": 10,
                "project_id": 1,
                "raw_body": "{\"event\": \"user.created\"}",
                "headers": {"Content-Type": "application/json"},
                "status": "failed",
                "delivery_attempts": [
                    {
                        "id": 9,
                        "event_id": "evt_abc123",
                        "connection_id": 31,
                        "status": "failed",
                        "status_code": 500,
                        "error_reason": "upstream error",
                        "duration_ms": 120,
                        "created_at": "2024-01-01T00:00:01Z"
                    }
                ],
                "created_at": "2024-01-01T00:00:00Z"
            }
        })))
        .mount(&mock_server)
        .await;

    let event = client.events().get(123).await.unwrap();
    assert_eq!(event.event_id, "evt_abc123");
    assert_eq!(event.status, "failed");
    assert_eq!(event.headers["Content-Type"], "application/json");

    let attempts = event.delivery_attempts.unwrap();
    assert_eq!(attempts[0].status_code, 500);
    assert_eq!(attempts[0].error_reason.as_deref(), Some("upstream error"));
}

#[tokio::test]
async fn test_replay_event_returns_bare_payload() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/replay-event"))
        .and(body_json(json!({"event_id": "evt_abc123def456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "success",
            "status_code": 200,
            "duration_ms": 150,
            "attempt_id": 456
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .events()
        .replay(&ReplayEventRequest::new("evt_abc123def456"))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.status_code, 200);
    assert_eq!(result.attempt_id, 456);
    assert_eq!(result.error_reason, None);
}

#[tokio::test]
async fn test_list_delivery_attempts_with_filters() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/delivery-attempts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attempts": [
                {
                    "id": 9,
                    "event_id": "evt_abc123",
                    "connection_id": 31,
                    "status": "success",
                    "status_code": 200,
                    "duration_ms": 80,
                    "created_at": "2024-01-01T00:00:01Z"
                }
            ],
            "total": 1,
            "limit": 20,
            "offset": 40
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client
        .delivery_attempts()
        .list(
            1,
            &ListDeliveryAttemptsOptions {
                event_id: Some("evt_abc123".to_string()),
                connection_id: Some(31),
                sort: Some("created_at_desc".to_string()),
                limit: Some(20),
                offset: Some(40),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.offset, 40);
    assert_eq!(page.attempts[0].connection_id, 31);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        query_pairs(&requests[0]),
        vec![
            ("event_id".to_string(), "evt_abc123".to_string()),
            ("connection_id".to_string(), "31".to_string()),
            ("sort".to_string(), "created_at_desc".to_string()),
            ("limit".to_string(), "20".to_string()),
            ("offset".to_string(), "40".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_webhook_send_is_unauthenticated() {
    let (mock_server, client) = setup().await;
    client.set_organization(5);

    let payload = json!({"event": "user.created", "user_id": 42});

    Mock::given(method("POST"))
        .and(path("/hook/src_abc123"))
        .and(body_json(payload.clone()))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({"event_id": "evt_1", "status": "queued"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let event_id = client.webhooks().send("src_abc123", &payload).await.unwrap();
    assert_eq!(event_id, "evt_1");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("x-organization-id").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_webhook_send_strips_credential_default_headers() {
    let mock_server = MockServer::start().await;
    let client = Client::builder()
        .api_token("test-token")
        .base_url(mock_server.uri())
        .unwrap()
        .default_header("Authorization", "Bearer secret")
        .unwrap()
        .default_header("X-Organization-ID", "9")
        .unwrap()
        .default_header("X-Trace", "on")
        .unwrap()
        .build()
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/hook/src_abc123"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"event_id": "evt_2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let event_id = client
        .webhooks()
        .send("src_abc123", &json!({"event": "user.created"}))
        .await
        .unwrap();
    assert_eq!(event_id, "evt_2");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("x-organization-id").is_none());
    assert_eq!(requests[0].headers.get("x-trace").unwrap(), "on");
}

#[tokio::test]
async fn test_webhook_send_zero_event_id_is_missing() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hook/src_abc123"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"event_id": 0})))
        .mount(&mock_server)
        .await;

    let err = client
        .webhooks()
        .send("src_abc123", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Webhook(_)));
    assert_eq!(err.message(), "No event_id in response");
}

#[tokio::test]
async fn test_webhook_send_error_embeds_status() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hook/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "source not found"})),
        )
        .mount(&mock_server)
        .await;

    let err = client
        .webhooks()
        .send("missing", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Webhook(_)));
    assert_eq!(err.to_string(), "source not found (Status: 404)");
}

#[tokio::test]
async fn test_webhook_send_requires_event_id() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hook/src_abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .mount(&mock_server)
        .await;

    let err = client
        .webhooks()
        .send("src_abc123", &json!({"a": 1}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No event_id in response");
}
