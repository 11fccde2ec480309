//! Statistics aggregation
//!
//! Pure functions of the final per-page records: category rollups,
//! status-code juice buckets, median, top backlink sources, error-page
//! leakage. Nothing here mutates the snapshot or the scores.

use crate::config::EngineConfig;
use crate::graph::GraphSnapshot;
use crate::models::{AnchorCount, CategoryStats, PageResult, StatusJuice};
use std::collections::BTreeMap;
use tracing::info;

/// Aggregate view of one analysis, consumed by the recommendation rules and
/// the final result assembly.
#[derive(Debug, Clone)]
pub struct Aggregates {
    /// Per-page records, score descending (ties by URL for determinism).
    pub pages: Vec<PageResult>,
    pub categories: BTreeMap<String, CategoryStats>,
    pub status_juice: StatusJuice,
    pub median_score: f64,
    pub top_backlink_sources: Vec<PageResult>,
    pub error_pages_with_links: Vec<PageResult>,
    pub leakage_rate: f64,
}

/// Build all aggregates from a snapshot and its normalized score vector.
pub fn aggregate(snapshot: &GraphSnapshot, scores: &[f64], config: &EngineConfig) -> Aggregates {
    let mut pages: Vec<PageResult> = snapshot
        .page_ids()
        .map(|id| {
            let meta = &snapshot.meta[id];
            PageResult {
                url: snapshot.url(id).to_string(),
                score: scores[id],
                backlinks_count: snapshot.backlinks[id],
                internal_links_received: meta.received,
                internal_links_sent: meta.sent,
                status_code: meta.status_code,
                is_error: meta.is_error,
                category: meta.category.clone(),
                top_anchors: top_anchors(&meta.anchors),
            }
        })
        .collect();
    pages.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.url.cmp(&b.url))
    });

    let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
    let mut status_juice = StatusJuice::default();
    for page in &pages {
        let entry = categories.entry(page.category.clone()).or_default();
        entry.count += 1;
        entry.total_score += page.score;
        status_juice.add(page.status_code, page.score);
    }
    for stats in categories.values_mut() {
        // count is always > 0 for a present category
        stats.avg_score = stats.total_score / stats.count as f64;
    }

    let median_score = median(scores);

    let mut top_backlink_sources: Vec<PageResult> = pages
        .iter()
        .filter(|p| p.backlinks_count > 0)
        .cloned()
        .collect();
    top_backlink_sources.sort_by(|a, b| {
        b.backlinks_count
            .cmp(&a.backlinks_count)
            .then_with(|| a.url.cmp(&b.url))
    });
    top_backlink_sources.truncate(config.thresholds.top_sources);

    let mut error_pages_with_links: Vec<PageResult> = pages
        .iter()
        .filter(|p| p.is_error && p.internal_links_received.total > 0)
        .cloned()
        .collect();
    error_pages_with_links.sort_by(|a, b| {
        b.internal_links_received
            .total
            .cmp(&a.internal_links_received.total)
            .then_with(|| a.url.cmp(&b.url))
    });

    let links_to_errors: u64 = error_pages_with_links
        .iter()
        .map(|p| u64::from(p.internal_links_received.total))
        .sum();
    let leakage_rate = if snapshot.edge_count > 0 {
        links_to_errors as f64 / snapshot.edge_count as f64 * 100.0
    } else {
        0.0
    };

    info!(
        pages = pages.len(),
        categories = categories.len(),
        error_pages = error_pages_with_links.len(),
        leakage_rate,
        "aggregation complete"
    );

    Aggregates {
        pages,
        categories,
        status_juice,
        median_score,
        top_backlink_sources,
        error_pages_with_links,
        leakage_rate,
    }
}

/// Standard median: mean of the two middle values for an even count,
/// 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Top-3 inbound anchors by count, ties broken alphabetically.
fn top_anchors(anchors: &rustc_hash::FxHashMap<String, u32>) -> Vec<AnchorCount> {
    let mut ranked: Vec<AnchorCount> = anchors
        .iter()
        .map(|(anchor, &count)| AnchorCount {
            anchor: anchor.clone(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.anchor.cmp(&b.anchor)));
    ranked.truncate(3);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ExclusionRules, GraphBuilder};
    use crate::models::{LinkPosition, RawLink};
    use std::collections::HashMap;

    #[test]
    fn test_median_odd_even_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_top_anchors_capped_at_three() {
        let mut anchors = rustc_hash::FxHashMap::default();
        anchors.insert("one".to_string(), 5);
        anchors.insert("two".to_string(), 3);
        anchors.insert("three".to_string(), 3);
        anchors.insert("four".to_string(), 1);
        let ranked = top_anchors(&anchors);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].anchor, "one");
        // Tie between "two" and "three" resolved alphabetically.
        assert_eq!(ranked[1].anchor, "three");
        assert_eq!(ranked[2].anchor, "two");
    }

    fn fixture() -> (crate::graph::GraphSnapshot, Vec<f64>) {
        let links = vec![
            RawLink::new(
                "https://example.com/",
                "https://example.com/blog/post",
                "post",
                200,
                LinkPosition::Content,
            ),
            RawLink::new(
                "https://example.com/",
                "https://example.com/shop/item",
                "item",
                200,
                LinkPosition::Content,
            ),
            RawLink::new(
                "https://example.com/blog/post",
                "https://example.com/gone",
                "old",
                404,
                LinkPosition::Content,
            ),
            RawLink::new(
                "https://example.com/shop/item",
                "https://example.com/gone",
                "old",
                404,
                LinkPosition::Navigation,
            ),
        ];
        let mut backlinks = HashMap::new();
        backlinks.insert("https://example.com/".to_string(), 12);
        let snapshot = GraphBuilder::new(ExclusionRules::default()).build(&links, &backlinks);

        // One score slot per page, keyed by interning order.
        let mut scores = vec![0.0; snapshot.node_count()];
        scores[snapshot.page_id("https://example.com/").unwrap()] = 100.0;
        scores[snapshot.page_id("https://example.com/blog/post").unwrap()] = 40.0;
        scores[snapshot.page_id("https://example.com/shop/item").unwrap()] = 40.0;
        scores[snapshot.page_id("https://example.com/gone").unwrap()] = 20.0;
        (snapshot, scores)
    }

    #[test]
    fn test_pages_sorted_and_categorized() {
        let (snapshot, scores) = fixture();
        let aggregates = aggregate(&snapshot, &scores, &EngineConfig::default());

        assert_eq!(aggregates.pages.len(), 4);
        assert_eq!(aggregates.pages[0].url, "https://example.com/");
        assert_eq!(aggregates.pages[0].category, "Homepage");
        // Tie at 40.0 broken by URL.
        assert_eq!(aggregates.pages[1].url, "https://example.com/blog/post");

        let blog = &aggregates.categories["Blog"];
        assert_eq!(blog.count, 1);
        assert!((blog.avg_score - 40.0).abs() < 1e-9);
        assert_eq!(aggregates.categories["Homepage"].count, 1);
    }

    #[test]
    fn test_status_juice_and_leakage() {
        let (snapshot, scores) = fixture();
        let aggregates = aggregate(&snapshot, &scores, &EngineConfig::default());

        assert!((aggregates.status_juice.ok - 180.0).abs() < 1e-9);
        assert!((aggregates.status_juice.client_error_4xx - 20.0).abs() < 1e-9);

        // 2 of 4 internal links point at the 404 page.
        assert_eq!(aggregates.error_pages_with_links.len(), 1);
        assert!((aggregates.leakage_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_backlink_sources() {
        let (snapshot, scores) = fixture();
        let aggregates = aggregate(&snapshot, &scores, &EngineConfig::default());

        assert_eq!(aggregates.top_backlink_sources.len(), 1);
        assert_eq!(aggregates.top_backlink_sources[0].url, "https://example.com/");
        assert_eq!(aggregates.top_backlink_sources[0].backlinks_count, 12);
    }

    #[test]
    fn test_empty_graph_aggregates() {
        let snapshot = crate::graph::GraphSnapshot::empty();
        let aggregates = aggregate(&snapshot, &[], &EngineConfig::default());
        assert!(aggregates.pages.is_empty());
        assert_eq!(aggregates.median_score, 0.0);
        assert_eq!(aggregates.leakage_rate, 0.0);
    }
}
