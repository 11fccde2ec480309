//! URL interning
//!
//! Every surviving URL is interned once into a dense `PageId`, so the hot
//! distribution loop works on contiguous `Vec<f64>` score vectors instead of
//! hashing URL strings per iteration.

use lasso::{Key, Rodeo, Spur};

/// Dense index of a page in the graph. Valid as a direct index into the
/// snapshot's adjacency, backlink, meta, and score vectors.
pub type PageId = usize;

/// Interner mapping URLs to dense page ids.
#[derive(Debug, Default)]
pub struct UrlArena {
    inner: Rodeo,
}

impl UrlArena {
    pub fn new() -> Self {
        Self {
            inner: Rodeo::default(),
        }
    }

    /// Intern a URL, returning its id. Re-interning returns the existing id.
    #[inline]
    pub fn intern(&mut self, url: &str) -> PageId {
        self.inner.get_or_intern(url).into_usize()
    }

    /// Id for an already-interned URL.
    #[inline]
    pub fn get(&self, url: &str) -> Option<PageId> {
        self.inner.get(url).map(|k| k.into_usize())
    }

    /// The URL for an id. Panics on an id never handed out by this arena.
    #[inline]
    pub fn resolve(&self, id: PageId) -> &str {
        let key = Spur::try_from_usize(id).expect("page id out of range");
        self.inner.resolve(&key)
    }

    /// Number of interned URLs. Ids are always `0..len()`.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
