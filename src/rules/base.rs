//! Base rule trait and evaluation context
//!
//! Every recommendation comes from one independent rule: a pure check over
//! the final aggregates that either produces a single evidence-backed card or
//! stays silent. Rules never share mutable state.

use crate::config::RuleThresholds;
use crate::models::{Recommendation, SearchPerformance};
use crate::stats::Aggregates;
use std::collections::HashMap;

/// Read-only view handed to every rule.
pub struct RuleContext<'a> {
    pub aggregates: &'a Aggregates,
    /// Optional per-URL external search performance. Rules that need it
    /// stay silent when it is absent.
    pub search: Option<&'a HashMap<String, SearchPerformance>>,
    pub thresholds: &'a RuleThresholds,
}

impl RuleContext<'_> {
    pub fn median(&self) -> f64 {
        self.aggregates.median_score
    }

    /// Search aggregate for one page, if search data was supplied at all.
    pub fn search_for(&self, url: &str) -> Option<&SearchPerformance> {
        self.search.and_then(|map| map.get(url))
    }
}

/// A single recommendation rule.
pub trait Rule: Send + Sync {
    /// Stable identifier, also used as the recommendation id.
    fn id(&self) -> &'static str;

    /// One-line description of what the rule looks for.
    fn description(&self) -> &'static str;

    /// Evaluate the rule; `None` means nothing to recommend.
    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation>;
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{LinksReceived, PageResult, StatusJuice};
    use crate::stats;

    /// Bare page record for rule tests.
    pub fn page(url: &str, score: f64) -> PageResult {
        PageResult {
            url: url.to_string(),
            score,
            backlinks_count: 0,
            internal_links_received: LinksReceived::default(),
            internal_links_sent: 0,
            status_code: 200,
            is_error: false,
            category: "Other".to_string(),
            top_anchors: Vec::new(),
        }
    }

    /// Aggregates built directly from page records, bypassing the graph.
    pub fn aggregates_from_pages(pages: Vec<PageResult>) -> Aggregates {
        let scores: Vec<f64> = pages.iter().map(|p| p.score).collect();
        let error_pages_with_links: Vec<PageResult> = {
            let mut errors: Vec<PageResult> = pages
                .iter()
                .filter(|p| p.is_error && p.internal_links_received.total > 0)
                .cloned()
                .collect();
            errors.sort_by(|a, b| {
                b.internal_links_received
                    .total
                    .cmp(&a.internal_links_received.total)
            });
            errors
        };
        Aggregates {
            pages,
            categories: Default::default(),
            status_juice: StatusJuice::default(),
            median_score: stats::median(&scores),
            top_backlink_sources: Vec::new(),
            error_pages_with_links,
            leakage_rate: 0.0,
        }
    }

    pub fn thresholds() -> crate::config::RuleThresholds {
        EngineConfig::default().thresholds
    }
}
