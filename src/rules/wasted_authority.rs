//! Wasted authority rule
//!
//! A page scoring above the site median already collects plenty of internal
//! equity. If no keyword with meaningful impressions ranks inside the
//! quick-win window for it, that equity is producing nothing and should be
//! redirected toward pages that can use it.

use crate::models::{Example, Priority, Recommendation};
use crate::rules::base::{Rule, RuleContext};

pub struct WastedAuthority;

impl Rule for WastedAuthority {
    fn id(&self) -> &'static str {
        "wasted-authority"
    }

    fn description(&self) -> &'static str {
        "High-equity pages with no keyword performance to show for it"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation> {
        // Cannot judge keyword performance without search data.
        ctx.search?;
        let t = ctx.thresholds;
        let median = ctx.median();

        let wasted: Vec<_> = ctx
            .aggregates
            .pages
            .iter()
            .filter(|page| page.score > median && !page.is_error)
            .filter(|page| {
                let best = ctx.search_for(&page.url).and_then(|perf| {
                    perf.keywords
                        .iter()
                        .filter(|k| k.impressions >= t.min_impressions)
                        .map(|k| k.position)
                        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                });
                // No qualifying keyword at all, or the best one ranks below
                // the quick-win window.
                match best {
                    None => true,
                    Some(position) => position > t.quick_win_max_position,
                }
            })
            .collect();
        if wasted.is_empty() {
            return None;
        }

        let total_score: f64 = wasted.iter().map(|p| p.score).sum();

        // Pages already come sorted by score descending.
        let examples: Vec<Example> = wasted
            .iter()
            .take(t.max_examples)
            .map(|p| Example {
                url: p.url.clone(),
                detail: format!("score {:.1} vs median {:.1}", p.score, median),
            })
            .collect();

        Some(Recommendation {
            id: self.id().to_string(),
            priority: Priority::Medium,
            category: "redistribution".to_string(),
            title: format!("{} pages hold authority without ranking for it", wasted.len()),
            description: format!(
                "These pages score above the site median ({:.1}) but no keyword with at least \
                 {} impressions ranks within reach for them. Move some of their internal links \
                 toward pages closer to ranking.",
                median, t.min_impressions
            ),
            impact: format!("{:.1} points of equity are parked unproductively", total_score),
            examples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordStat, SearchPerformance};
    use crate::rules::base::testutil::{aggregates_from_pages, page, thresholds};
    use std::collections::HashMap;

    fn performing(position: f64) -> SearchPerformance {
        SearchPerformance {
            keywords: vec![KeywordStat {
                query: "q".to_string(),
                clicks: 10,
                impressions: 200,
                position,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_silent_without_search_data() {
        let aggregates = aggregates_from_pages(vec![
            page("https://example.com/a", 90.0),
            page("https://example.com/b", 10.0),
        ]);
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: None,
            thresholds: &thresholds(),
        };
        assert!(WastedAuthority.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_flags_high_scorer_with_no_search_entry() {
        let aggregates = aggregates_from_pages(vec![
            page("https://example.com/a", 90.0),
            page("https://example.com/b", 10.0),
        ]);
        // Search data present overall, but /a has no entry: nothing ranks.
        let mut search = HashMap::new();
        search.insert("https://example.com/b".to_string(), performing(3.0));
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: Some(&search),
            thresholds: &thresholds(),
        };

        let rec = WastedAuthority.evaluate(&ctx).expect("rule should fire");
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.examples.len(), 1);
        assert_eq!(rec.examples[0].url, "https://example.com/a");
    }

    #[test]
    fn test_spares_pages_that_rank() {
        let aggregates = aggregates_from_pages(vec![
            page("https://example.com/a", 90.0),
            page("https://example.com/b", 10.0),
        ]);
        let mut search = HashMap::new();
        // Ranks inside the quick-win window with enough impressions.
        search.insert("https://example.com/a".to_string(), performing(8.0));
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: Some(&search),
            thresholds: &thresholds(),
        };
        assert!(WastedAuthority.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_flags_pages_ranking_too_deep() {
        let aggregates = aggregates_from_pages(vec![
            page("https://example.com/a", 90.0),
            page("https://example.com/b", 10.0),
        ]);
        let mut search = HashMap::new();
        // Best qualifying keyword sits at position 40: out of reach.
        search.insert("https://example.com/a".to_string(), performing(40.0));
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: Some(&search),
            thresholds: &thresholds(),
        };

        let rec = WastedAuthority.evaluate(&ctx).expect("rule should fire");
        assert_eq!(rec.examples[0].url, "https://example.com/a");
    }

    #[test]
    fn test_ignores_pages_at_or_below_median() {
        let aggregates = aggregates_from_pages(vec![
            page("https://example.com/a", 50.0),
            page("https://example.com/b", 50.0),
        ]);
        let search = HashMap::new();
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: Some(&search),
            thresholds: &thresholds(),
        };
        // Both sit exactly at the median; strict inequality keeps them out.
        assert!(WastedAuthority.evaluate(&ctx).is_none());
    }
}
