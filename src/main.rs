//! Permit Office Service - HTTP API for permit records and documents
//!
//! This binary serves permit records with PDF, QR, and verification-page
//! rendering, backed by upstream sources with a static fallback.

use permit_office::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local .env overrides, if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServiceConfig::load()?;

    // Start server
    permit_office::start_server(config).await?;

    Ok(())
}
