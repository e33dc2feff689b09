//! Integration tests for record resolution: source fan-out, the TTL cache,
//! and fallback provenance.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use permit_office::cache::PermitCache;
use permit_office::record::{DocumentType, PermitRecord, Provenance};
use permit_office::sources::{
    FetchError, RecordFetcher, SourceAggregator, SourceEndpoint,
};

/// Scripted fetcher: counts calls and answers each one from a fixed plan.
struct ScriptedFetcher {
    calls: AtomicUsize,
    outcome: Outcome,
}

enum Outcome {
    Records(Vec<PermitRecord>),
    Failure,
    Empty,
    /// Succeed only for one document type; every other source fails.
    HealthyFor(DocumentType, Vec<PermitRecord>),
}

impl ScriptedFetcher {
    fn returning(records: Vec<PermitRecord>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Outcome::Records(records),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Outcome::Failure,
        })
    }

    fn empty() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Outcome::Empty,
        })
    }

    fn healthy_only_for(document_type: DocumentType, records: Vec<PermitRecord>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Outcome::HealthyFor(document_type, records),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordFetcher for ScriptedFetcher {
    async fn fetch(&self, source: &SourceEndpoint) -> Result<Vec<PermitRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Records(records) => Ok(records.clone()),
            Outcome::Failure => Err(FetchError::Status(503)),
            Outcome::Empty => Ok(Vec::new()),
            Outcome::HealthyFor(document_type, records) => {
                if source.document_type == *document_type {
                    Ok(records.clone())
                } else {
                    Err(FetchError::Status(503))
                }
            }
        }
    }
}

fn source(document_type: DocumentType) -> SourceEndpoint {
    SourceEndpoint {
        document_type,
        endpoint: "https://upstream.example/records".to_string(),
        credential: "token".to_string(),
    }
}

fn upstream_record(id: u64) -> PermitRecord {
    PermitRecord {
        id,
        document_type: DocumentType::GeneralWorkPermit,
        name: Some("Upstream Holder".to_string()),
        permit_number: Some(format!("WP/TEST/{id}")),
        issue_date: "2025-06-01".to_string(),
        ..Default::default()
    }
}

fn aggregator(sources: Vec<SourceEndpoint>, fetcher: Arc<ScriptedFetcher>) -> SourceAggregator {
    SourceAggregator::new(sources, fetcher)
        .with_timing(Duration::from_secs(5), Duration::from_millis(10))
}

#[tokio::test]
async fn no_sources_serves_fallback_records() {
    let fetcher = ScriptedFetcher::returning(vec![]);
    let set = aggregator(vec![], fetcher.clone()).load().await;

    assert_eq!(set.provenance, Provenance::Fallback);
    assert_eq!(set.records.len(), 13);
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn healthy_source_yields_external_provenance() {
    let fetcher = ScriptedFetcher::returning(vec![upstream_record(101), upstream_record(102)]);
    let set = aggregator(vec![source(DocumentType::GeneralWorkPermit)], fetcher.clone())
        .load()
        .await;

    assert_eq!(set.provenance, Provenance::External);
    assert_eq!(set.records.len(), 2);
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn failing_sources_are_retried_once_then_fall_back() {
    let fetcher = ScriptedFetcher::failing();
    let set = aggregator(
        vec![
            source(DocumentType::PermanentResidence),
            source(DocumentType::BirthCertificate),
        ],
        fetcher.clone(),
    )
    .load()
    .await;

    assert_eq!(set.provenance, Provenance::Fallback);
    assert_eq!(set.records.len(), 13);
    // Two sources, one attempt plus one retry each.
    assert_eq!(fetcher.call_count(), 4);
}

#[tokio::test]
async fn one_healthy_source_among_failures_is_enough() {
    let fetcher = ScriptedFetcher::healthy_only_for(
        DocumentType::GeneralWorkPermit,
        vec![upstream_record(501), upstream_record(502)],
    );
    let set = aggregator(
        vec![
            source(DocumentType::PermanentResidence),
            source(DocumentType::GeneralWorkPermit),
            source(DocumentType::RefugeeStatus),
        ],
        fetcher.clone(),
    )
    .load()
    .await;

    // Exactly the healthy source's records, never unioned with fallback.
    assert_eq!(set.provenance, Provenance::External);
    assert_eq!(set.records.len(), 2);
    assert!(set.records.iter().all(|r| r.id == 501 || r.id == 502));
    // One call for the healthy source, attempt plus retry for each failure.
    assert_eq!(fetcher.call_count(), 5);
}

#[tokio::test]
async fn empty_sources_fall_back_without_retrying() {
    let fetcher = ScriptedFetcher::empty();
    let set = aggregator(vec![source(DocumentType::RefugeeStatus)], fetcher.clone())
        .load()
        .await;

    assert_eq!(set.provenance, Provenance::Fallback);
    // An empty success is an answer, not a failure.
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn cache_serves_snapshot_within_ttl() {
    let fetcher = ScriptedFetcher::returning(vec![upstream_record(201)]);
    let cache = PermitCache::new(
        aggregator(vec![source(DocumentType::GeneralWorkPermit)], fetcher.clone()),
        Duration::from_secs(300),
    );

    let first = cache.records(false).await;
    let second = cache.records(false).await;

    assert_eq!(first.records.len(), 1);
    assert_eq!(second.records.len(), 1);
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn cache_force_refresh_bypasses_ttl() {
    let fetcher = ScriptedFetcher::returning(vec![upstream_record(301)]);
    let cache = PermitCache::new(
        aggregator(vec![source(DocumentType::GeneralWorkPermit)], fetcher.clone()),
        Duration::from_secs(300),
    );

    cache.records(false).await;
    cache.records(true).await;

    assert_eq!(fetcher.call_count(), 2);
}

#[tokio::test]
async fn cache_expires_after_ttl() {
    let fetcher = ScriptedFetcher::returning(vec![upstream_record(401)]);
    let cache = PermitCache::new(
        aggregator(vec![source(DocumentType::GeneralWorkPermit)], fetcher.clone()),
        Duration::from_millis(20),
    );

    cache.records(false).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    cache.records(false).await;

    assert_eq!(fetcher.call_count(), 2);
}

#[tokio::test]
async fn cache_lookups_hit_the_shared_snapshot() {
    let fetcher = ScriptedFetcher::failing();
    let cache = PermitCache::new(
        aggregator(vec![source(DocumentType::PermanentResidence)], fetcher.clone()),
        Duration::from_secs(300),
    );

    let by_id = cache.find_by_id(1).await;
    let by_number = cache.find_by_number("PR/PTA/2025/10/13459").await;

    assert!(by_id.is_some());
    assert_eq!(by_id.map(|r| r.id), by_number.map(|r| r.id));
    assert_eq!(cache.count().await, 13);
    // The failed refresh ran once; the later lookups reused its snapshot.
    assert_eq!(fetcher.call_count(), 2);
}
