//! Immutable graph snapshots and the keyed snapshot store
//!
//! A `GraphSnapshot` is the builder's output, frozen: score distribution and
//! incremental recompute both read it, neither mutates it. Published snapshots
//! live in a `SnapshotStore` so later "what if" requests can reuse them
//! without re-parsing raw inputs.

use crate::graph::arena::{PageId, UrlArena};
use crate::models::{LinkPosition, LinksReceived};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// A surviving outgoing edge, by destination page id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutLink {
    pub target: PageId,
    pub position: LinkPosition,
}

/// Per-page metadata collected during graph construction.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub status_code: u16,
    pub is_error: bool,
    pub received: LinksReceived,
    pub sent: u32,
    /// Inbound anchor text multiset.
    pub anchors: FxHashMap<String, u32>,
    /// First path segment, or "Homepage" for the site root.
    pub category: String,
}

/// The in-memory directed multigraph for one analyzed site.
///
/// All vectors are indexed by `PageId`; the arena maps ids back to URLs.
#[derive(Debug)]
pub struct GraphSnapshot {
    pub(crate) arena: UrlArena,
    /// Outgoing edges per source page.
    pub adjacency: Vec<Vec<OutLink>>,
    /// Qualifying external backlink count per page.
    pub backlinks: Vec<u32>,
    pub meta: Vec<PageMeta>,
    /// Majority-vote dominant domain, `None` for an empty graph.
    pub domain: Option<String>,
    /// Total surviving internal edges.
    pub edge_count: usize,
}

impl GraphSnapshot {
    /// Empty graph: zero nodes, no domain.
    pub fn empty() -> Self {
        Self {
            arena: UrlArena::new(),
            adjacency: Vec::new(),
            backlinks: Vec::new(),
            meta: Vec::new(),
            domain: None,
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// URL for a page id.
    pub fn url(&self, id: PageId) -> &str {
        self.arena.resolve(id)
    }

    /// Page id for a URL, if it survived filtering.
    pub fn page_id(&self, url: &str) -> Option<PageId> {
        self.arena.get(url)
    }

    /// All page ids in deterministic order.
    pub fn page_ids(&self) -> impl Iterator<Item = PageId> {
        0..self.node_count()
    }
}

#[derive(Debug, Clone)]
struct StoredSnapshot {
    snapshot: Arc<GraphSnapshot>,
    created_at: DateTime<Utc>,
}

/// Concurrent keyed store for published snapshots.
///
/// Publishing replaces the entry atomically; readers hold `Arc`s, so an
/// in-flight recompute keeps its snapshot alive even after replacement.
/// Capacity is bounded: the oldest entry is evicted first.
#[derive(Debug)]
pub struct SnapshotStore {
    entries: DashMap<String, StoredSnapshot>,
    capacity: usize,
}

impl SnapshotStore {
    /// Create a store retaining at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Publish a snapshot under `key`, replacing any previous one.
    pub fn publish(&self, key: impl Into<String>, snapshot: Arc<GraphSnapshot>) {
        let key = key.into();
        self.entries.insert(
            key.clone(),
            StoredSnapshot {
                snapshot,
                created_at: Utc::now(),
            },
        );
        debug!(key = %key, stored = self.entries.len(), "published snapshot");
        self.evict_over_capacity();
    }

    /// Fetch a published snapshot.
    pub fn get(&self, key: &str) -> Option<Arc<GraphSnapshot>> {
        self.entries.get(key).map(|e| Arc::clone(&e.snapshot))
    }

    /// Drop a snapshot. Returns whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_over_capacity(&self) {
        while self.entries.len() > self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|e| e.value().created_at)
                .map(|e| e.key().clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                    debug!(key = %key, "evicted oldest snapshot");
                }
                None => break,
            }
        }
    }
}
