//! Walks the resources visible to an API token.
//!
//! This example shows how to:
//! - Configure a client from the environment
//! - Pick an organization for subsequent requests
//! - List projects, sources and recent events
//!
//! Run with: `VOLLEY_API_TOKEN=... cargo run --example list_resources`

use volley::resources::ListEventsOptions;
use volley::{ClientBuilder, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("volley=debug,list_resources=info")
        .init();

    let client = ClientBuilder::from_env()?.build()?;

    println!("=== Organizations ===");
    let orgs = client.organizations().list().await?;
    for org in &orgs {
        println!("  - {} (ID: {}, Role: {})", org.name, org.id, org.role);
    }
    let Some(org) = orgs.first() else {
        println!("  No organizations found");
        return Ok(());
    };
    client.set_organization(org.id);

    println!("\n=== Projects in {} ===", org.name);
    let projects = client.projects().list().await?;
    for project in &projects {
        let default = if project.is_default { ", Default" } else { "" };
        println!("  - {} (ID: {}{})", project.name, project.id, default);
    }
    let Some(project) = projects.first() else {
        println!("  No projects found");
        return Ok(());
    };

    println!("\n=== Sources in {} ===", project.name);
    for source in client.sources().list(project.id).await? {
        println!(
            "  - {} (ID: {}, Ingestion ID: {})",
            source.slug, source.id, source.ingestion_id
        );
    }

    println!("\n=== Recent events in {} ===", project.name);
    let events = client
        .events()
        .list(
            project.id,
            &ListEventsOptions {
                limit: Some(10),
                ..Default::default()
            },
        )
        .await?;
    println!("Total events: {}", events.total);
    for event in events.requests.iter().take(5) {
        println!("  - Event ID: {}, Status: {}", event.event_id, event.status);
    }

    Ok(())
}
