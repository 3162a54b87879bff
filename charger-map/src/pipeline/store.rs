//! The live feature collection.
//!
//! Single writer (the pipeline), many readers (the web layer). Readers get
//! an `Arc` to a complete collection, so a publication is atomic from their
//! point of view.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use geojson::FeatureCollection;
use tokio::sync::RwLock;

/// Claim on a future publication, taken before a fetch starts.
///
/// Tickets are ordered by issue time; the store refuses to publish a ticket
/// older than the one it last published, so a slow fetch can never overwrite
/// the result of a newer one.
///
/// A single [`super::Pipeline`] never races itself (it runs one refresh at a
/// time), so this only matters when several writers share one store: two
/// pipelines over the same store, or code calling [`FeatureStore::publish`]
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Point-in-time view of the store.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub collection: Arc<FeatureCollection>,
    /// When the current collection was published (`None` until first publish).
    pub published_at: Option<DateTime<Utc>>,
    /// Number of successful publications.
    pub publications: u64,
    last_ticket: Option<RefreshTicket>,
}

impl Snapshot {
    fn initial() -> Self {
        Self {
            collection: Arc::new(empty_collection()),
            published_at: None,
            publications: 0,
            last_ticket: None,
        }
    }
}

/// A feature collection with no features.
pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// Thread-safe holder of the current feature collection.
#[derive(Clone)]
pub struct FeatureStore {
    inner: Arc<RwLock<Snapshot>>,
    next_ticket: Arc<AtomicU64>,
}

impl FeatureStore {
    /// Create a store holding an empty collection.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Snapshot::initial())),
            next_ticket: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issue a ticket for a refresh that is about to start.
    pub fn ticket(&self) -> RefreshTicket {
        RefreshTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Replace the current collection wholesale.
    ///
    /// Returns `false` (and changes nothing) if a newer ticket has already
    /// been published.
    pub async fn publish(&self, ticket: RefreshTicket, collection: FeatureCollection) -> bool {
        let mut guard = self.inner.write().await;
        if guard.last_ticket.is_some_and(|last| last > ticket) {
            return false;
        }

        guard.collection = Arc::new(collection);
        guard.published_at = Some(Utc::now());
        guard.publications += 1;
        guard.last_ticket = Some(ticket);
        true
    }

    /// The live collection.
    pub async fn current(&self) -> Arc<FeatureCollection> {
        let guard = self.inner.read().await;
        Arc::clone(&guard.collection)
    }

    /// The live collection with its publication metadata.
    pub async fn snapshot(&self) -> Snapshot {
        let guard = self.inner.read().await;
        guard.clone()
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}
