//! Graph construction and storage
//!
//! Raw edge and backlink facts become an immutable, id-indexed snapshot:
//! the arena interns URLs into dense page ids, the builder runs the filtering
//! pipeline, and the store retains published snapshots for incremental
//! recompute.

mod arena;
mod builder;
mod snapshot;

pub use arena::{PageId, UrlArena};
pub use builder::{derive_category, ExclusionRules, GraphBuilder, DEFAULT_DISALLOWED_EXTENSIONS};
pub use snapshot::{GraphSnapshot, OutLink, PageMeta, SnapshotStore};
