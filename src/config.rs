use crate::record::DocumentType;
use crate::sources::SourceEndpoint;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Record cache time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// HMAC key for document signatures
    #[serde(default = "default_signing_key")]
    pub signing_key: String,

    /// Base URL for verification links embedded in documents and pages
    #[serde(default = "default_verify_base_url")]
    pub verify_base_url: String,

    /// Base URL of the public verification portal (printed on documents)
    #[serde(default = "default_public_verify_base")]
    pub public_verify_base: String,

    /// Directory holding template images and the coat-of-arms seal
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upstream record sources; entries without an endpoint and credential
    /// are skipped, not attempted.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// One upstream source as configured: which document type it feeds, where
/// it lives, and the credential to present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub document_type: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub credential: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            signing_key: default_signing_key(),
            verify_base_url: default_verify_base_url(),
            public_verify_base: default_public_verify_base(),
            assets_dir: default_assets_dir(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            sources: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from an optional config file with environment
    /// variable overrides (`PERMIT_OFFICE__*`).
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("permit-office").required(false))
            .add_source(config::Environment::with_prefix("PERMIT_OFFICE").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get cache time-to-live as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Usable upstream sources. A source needs both an endpoint and a
    /// credential; anything else stays on the fallback data.
    pub fn source_endpoints(&self) -> Vec<SourceEndpoint> {
        self.sources
            .iter()
            .filter(|s| !s.endpoint.is_empty() && !s.credential.is_empty())
            .map(|s| SourceEndpoint {
                document_type: DocumentType::from(s.document_type.clone()),
                endpoint: s.endpoint.clone(),
                credential: s.credential.clone(),
            })
            .collect()
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_signing_key() -> String {
    "dha-digital-signature-key-2025".to_string()
}

fn default_verify_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_public_verify_base() -> String {
    "https://www.dha.gov.za".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
