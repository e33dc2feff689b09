//! Permit Office Service - HTTP API for permit records and documents
//!
//! This crate provides an HTTP service that resolves permit and certificate
//! records and renders them as official documents. It supports:
//!
//! - **Record Resolution**: Upstream source fan-out with retry, a TTL
//!   snapshot cache, and a static fallback data set (the service never
//!   fails to answer)
//! - **Document Rendering**: Per-type PDF layouts with template-image
//!   overlay, drawn vector fallback, and a generic layout for unknown types
//! - **Verification**: QR codes, HMAC document signatures, and browser
//!   verification pages with computed validity
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use permit_office::ServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::load()?;
//!     permit_office::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Health with record count and provenance
//! - `GET /permits` - Full record set
//! - `GET /permits/{id}` - One record
//! - `GET /permits/{id}/pdf` - Rendered PDF document
//! - `GET /permits/{id}/qr` - Verification QR code (PNG)
//! - `GET /permits/{id}/verify` - Verification metadata with signature
//! - `GET /permits/{id}/verify-document` - Browser verification page
//! - `POST /validate` - Validate a permit number
//! - `POST /generate-pdf` - Render a caller-supplied record

pub mod assets;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod record;
pub mod render;
pub mod routes;
pub mod server;
pub mod signing;
pub mod sources;
pub mod state;
pub mod store;
pub mod verify;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use record::{DocumentType, PermitRecord, Provenance, ValidityStatus};
pub use server::{build_router, start_server};
pub use state::AppState;
