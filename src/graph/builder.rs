//! Graph construction from raw edge and backlink facts
//!
//! Filtering order: structural-position edges are dropped first, then URLs
//! off the dominant domain, then URLs matching the exclusion rules, then
//! self-referencing edges. What survives becomes the immutable snapshot the
//! distribution engine runs on.

use crate::graph::arena::UrlArena;
use crate::graph::snapshot::{GraphSnapshot, OutLink, PageMeta};
use crate::models::{LinkPosition, RawLink};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;

/// Default disallowed file extensions: binary assets that receive links but
/// are not pages.
pub const DEFAULT_DISALLOWED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".zip", ".doc", ".docx", ".xls",
    ".xlsx",
];

/// URL exclusion predicate: query strings and disallowed file extensions.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    disallowed_extensions: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            disallowed_extensions: DEFAULT_DISALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ExclusionRules {
    pub fn with_extensions(extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            disallowed_extensions: extensions
                .into_iter()
                .map(|e| {
                    let e = e.to_lowercase();
                    if e.starts_with('.') {
                        e
                    } else {
                        format!(".{e}")
                    }
                })
                .collect(),
        }
    }

    /// Whether a URL must be excluded from the graph.
    pub fn is_excluded(&self, raw_url: &str) -> bool {
        let path = match Url::parse(raw_url) {
            Ok(url) => {
                if url.query().is_some() {
                    return true;
                }
                url.path().to_lowercase()
            }
            // Unparsable URLs get the same checks on the raw string.
            Err(_) => {
                if raw_url.contains('?') {
                    return true;
                }
                raw_url.to_lowercase()
            }
        };
        self.disallowed_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }
}

/// Network location of a URL, for the dominant-domain vote.
fn url_host(raw_url: &str) -> Option<String> {
    Url::parse(raw_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Derive a page's category from its first path segment.
///
/// The site root maps to "Homepage"; unparsable URLs map to "Other".
pub fn derive_category(raw_url: &str) -> String {
    let parsed = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(_) => return "Other".to_string(),
    };
    let first_segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()).map(|s| s.to_string()));
    match first_segment {
        Some(segment) => capitalize(&segment),
        None => "Homepage".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Builds a [`GraphSnapshot`] from raw links and backlink counts.
pub struct GraphBuilder {
    rules: ExclusionRules,
}

impl GraphBuilder {
    pub fn new(rules: ExclusionRules) -> Self {
        Self { rules }
    }

    /// Run the full filtering pipeline and assemble the snapshot.
    pub fn build(&self, links: &[RawLink], backlinks: &HashMap<String, u32>) -> GraphSnapshot {
        // Structural edges (canonical, hreflang, pagination, meta) are out
        // before anything else; they never count as content or navigation.
        let countable: Vec<&RawLink> = links
            .iter()
            .filter(|l| l.position.is_countable())
            .collect();
        debug!(
            raw = links.len(),
            countable = countable.len(),
            "dropped structural-position edges"
        );

        // All URLs, in first-appearance order for deterministic page ids.
        let mut seen = FxHashSet::default();
        let mut all_urls: Vec<&str> = Vec::new();
        for link in &countable {
            for url in [link.source.as_str(), link.destination.as_str()] {
                if seen.insert(url) {
                    all_urls.push(url);
                }
            }
        }

        let domain = Self::dominant_domain(&all_urls);
        info!(
            urls = all_urls.len(),
            domain = domain.as_deref().unwrap_or("<none>"),
            "detected dominant domain"
        );

        // URL-level filters: off-domain, then exclusion predicate.
        let mut arena = UrlArena::new();
        for url in &all_urls {
            let on_domain = match (&domain, url_host(url)) {
                (Some(domain), Some(host)) => host == *domain,
                _ => false,
            };
            if on_domain && !self.rules.is_excluded(url) {
                arena.intern(url);
            }
        }
        let node_count = arena.len();
        debug!(
            surviving = node_count,
            dropped = all_urls.len() - node_count,
            "applied domain and exclusion filters"
        );

        let mut adjacency: Vec<Vec<OutLink>> = vec![Vec::new(); node_count];
        let mut meta: Vec<PageMeta> = (0..node_count)
            .map(|id| PageMeta {
                status_code: 200,
                category: derive_category(arena.resolve(id)),
                ..Default::default()
            })
            .collect();

        // Edge-level filters: both endpoints must survive, no self-links.
        let mut edge_count = 0usize;
        for link in &countable {
            if link.source == link.destination {
                continue;
            }
            let (source, target) = match (arena.get(&link.source), arena.get(&link.destination)) {
                (Some(s), Some(t)) => (s, t),
                // Pruned endpoint: skip silently, pruning routinely creates
                // dangling references.
                _ => continue,
            };

            adjacency[source].push(OutLink {
                target,
                position: link.position,
            });
            edge_count += 1;

            meta[source].sent += 1;
            let received = &mut meta[target].received;
            received.total += 1;
            match link.position {
                LinkPosition::Content => received.content += 1,
                LinkPosition::Navigation => received.navigation += 1,
                _ => {}
            }
            if !link.anchor.is_empty() {
                *meta[target].anchors.entry(link.anchor.clone()).or_insert(0) += 1;
            }
            meta[target].status_code = link.status_code;
            meta[target].is_error = link.status_code != 200;
        }

        // Backlink map restricted to surviving pages.
        let mut backlink_counts = vec![0u32; node_count];
        let mut backlinked_pages = 0usize;
        for (url, &count) in backlinks {
            if let Some(id) = arena.get(url) {
                backlink_counts[id] = count;
                if count > 0 {
                    backlinked_pages += 1;
                }
            }
        }

        info!(
            pages = node_count,
            edges = edge_count,
            backlinked_pages,
            "graph construction complete"
        );

        GraphSnapshot {
            arena,
            adjacency,
            backlinks: backlink_counts,
            meta,
            domain,
            edge_count,
        }
    }

    /// Majority vote over the network location of every URL.
    ///
    /// Ties break toward the lexicographically smallest host so repeated runs
    /// agree. URLs that fail to parse do not vote.
    fn dominant_domain(urls: &[&str]) -> Option<String> {
        let mut votes: FxHashMap<String, usize> = FxHashMap::default();
        for url in urls {
            if let Some(host) = url_host(url) {
                *votes.entry(host).or_insert(0) += 1;
            }
        }
        votes
            .into_iter()
            .max_by(|(host_a, count_a), (host_b, count_b)| {
                count_a.cmp(count_b).then(host_b.cmp(host_a))
            })
            .map(|(host, _)| host)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(ExclusionRules::default())
    }
}
