//! Upstream record sources: bounded fan-out fetch with fallback.
//!
//! The aggregator attempts every configured source concurrently, retries
//! each once, and bounds the whole refresh with a wall-clock timeout. It
//! never fails: when no source yields records the static seed set is served
//! instead, tagged with fallback provenance so callers can tell.

use crate::record::{DocumentType, PermitRecord, Provenance};
use crate::store;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Per-source fetch timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(3);
/// Delay before the single retry of a failed source.
const RETRY_DELAY: Duration = Duration::from_secs(1);
/// Wall-clock bound on a whole refresh cycle; late sources are discarded.
const OVERALL_TIMEOUT: Duration = Duration::from_secs(5);
/// Fan-out width. Source lists are short; this only guards pathological configs.
const CONCURRENCY: usize = 8;

/// One configured upstream source: which document type it feeds, where it
/// lives, and the credential to present.
#[derive(Debug, Clone)]
pub struct SourceEndpoint {
    pub document_type: DocumentType,
    pub endpoint: String,
    pub credential: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream payload not decodable: {0}")]
    Decode(String),
}

/// The snapshot produced by a refresh: an immutable record set plus where
/// it came from. Cloning is cheap (the record list is shared).
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub records: Arc<Vec<PermitRecord>>,
    pub provenance: Provenance,
}

/// Seam between the aggregator and the wire so tests can substitute a fake.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceEndpoint) -> Result<Vec<PermitRecord>, FetchError>;
}

/// Production fetcher: one GET per source with a bearer credential.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("permit-office/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client construction cannot fail with static config");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordFetcher for HttpFetcher {
    async fn fetch(&self, source: &SourceEndpoint) -> Result<Vec<PermitRecord>, FetchError> {
        let response = self
            .client
            .get(&source.endpoint)
            .bearer_auth(&source.credential)
            .header("X-Client-Type", "permit-office")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(extract_records(body))
    }
}

/// Upstream wire formats differ per integration; accept records under any of
/// the envelope keys seen in practice.
fn extract_records(body: Value) -> Vec<PermitRecord> {
    for key in ["permits", "records", "data", "results"] {
        if let Some(list) = body.get(key).and_then(Value::as_array) {
            return list
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect();
        }
    }
    if let Value::Array(list) = body {
        return list
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
    }
    Vec::new()
}

/// Refreshes the record set from configured sources, degrading to the seed
/// data when nothing is reachable.
pub struct SourceAggregator {
    sources: Vec<SourceEndpoint>,
    fetcher: Arc<dyn RecordFetcher>,
    overall_timeout: Duration,
    retry_delay: Duration,
}

impl SourceAggregator {
    pub fn new(sources: Vec<SourceEndpoint>, fetcher: Arc<dyn RecordFetcher>) -> Self {
        Self {
            sources,
            fetcher,
            overall_timeout: OVERALL_TIMEOUT,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Override the refresh timeout and retry delay. Tests shrink these to
    /// keep failure paths fast.
    pub fn with_timing(mut self, overall_timeout: Duration, retry_delay: Duration) -> Self {
        self.overall_timeout = overall_timeout;
        self.retry_delay = retry_delay;
        self
    }

    /// Load records from every configured source. Infallible by design:
    /// all failure paths end at the fallback set.
    pub async fn load(&self) -> RecordSet {
        if self.sources.is_empty() {
            tracing::debug!("no upstream sources configured, serving fallback records");
            return fallback_set();
        }

        let fetches: Vec<_> = self
            .sources
            .iter()
            .map(|source| self.fetch_with_retry(source))
            .collect();
        let fan_out = stream::iter(fetches)
            .buffer_unordered(CONCURRENCY)
            .collect::<Vec<Option<Vec<PermitRecord>>>>();

        let results = match tokio::time::timeout(self.overall_timeout, fan_out).await {
            Ok(results) => results,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.overall_timeout.as_secs(),
                    "upstream refresh timed out, serving fallback records"
                );
                return fallback_set();
            }
        };

        let mut merged = Vec::new();
        for records in results.into_iter().flatten() {
            merged.extend(records);
        }

        if merged.is_empty() {
            tracing::warn!("all upstream sources failed or were empty, serving fallback records");
            return fallback_set();
        }

        tracing::info!(count = merged.len(), "loaded records from upstream sources");
        RecordSet {
            records: Arc::new(merged),
            provenance: Provenance::External,
        }
    }

    /// One attempt plus one retry. A source that fails twice is dropped from
    /// this refresh cycle; it never blocks the others.
    async fn fetch_with_retry(&self, source: &SourceEndpoint) -> Option<Vec<PermitRecord>> {
        for attempt in 0..2 {
            match self.fetcher.fetch(source).await {
                Ok(records) if !records.is_empty() => {
                    tracing::info!(
                        source = %source.document_type,
                        count = records.len(),
                        "fetched upstream records"
                    );
                    return Some(records);
                }
                Ok(_) => {
                    tracing::debug!(source = %source.document_type, "source returned no records");
                    return None;
                }
                Err(e) if attempt == 0 => {
                    tracing::debug!(source = %source.document_type, error = %e, "retrying source");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    tracing::warn!(source = %source.document_type, error = %e, "source failed");
                }
            }
        }
        None
    }
}

fn fallback_set() -> RecordSet {
    RecordSet {
        records: Arc::new(store::fallback_records()),
        provenance: Provenance::Fallback,
    }
}
