//! Groupware Client - demo entry point
//!
//! Signs in to both services, lists the address book and the root of the
//! cloud file store, and signs out again.

use anyhow::Result;
use groupware_client::{Config, ContactsFacade, DiscoveryContext, FilesFacade};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Using discovery service at: {}",
        config.discovery_url
    );

    let discovery = Arc::new(DiscoveryContext::new(&config));

    // Contacts: sign in, list, sign out
    let contacts = ContactsFacade::sign_in(&config, discovery.clone()).await?;
    info!("Contacts session established for {}", contacts.user_id());

    let entries = contacts.list().await?;
    println!("{} contacts:", entries.len());
    for contact in &entries {
        println!(
            "  {} <{}> {}",
            contact.name,
            contact.email,
            if contact.photo.is_some() { "(photo)" } else { "" }
        );
    }

    // Files: sign in, list the root folder, sign out
    let files = FilesFacade::sign_in(&config, discovery).await?;
    info!("Files session established for {}", files.user_id());

    let listing = files.list().await?;
    println!("{} files:", listing.len());
    for file in &listing {
        println!("  {} ({} bytes)", file.name, file.content.len());
    }

    files.sign_out().await?;
    contacts.sign_out().await?;
    info!("Signed out");

    Ok(())
}
