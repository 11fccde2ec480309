//! Error leakage rule
//!
//! Internal links pointing at non-200 pages throw their equity away. This is
//! the highest-priority problem the engine can surface: every such link is a
//! wasted vote.

use crate::models::{Example, Priority, Recommendation};
use crate::rules::base::{Rule, RuleContext};

pub struct ErrorLeakage;

impl Rule for ErrorLeakage {
    fn id(&self) -> &'static str {
        "error-leakage"
    }

    fn description(&self) -> &'static str {
        "Internal links pointing at error pages leak equity"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation> {
        let error_pages = &ctx.aggregates.error_pages_with_links;
        if error_pages.is_empty() {
            return None;
        }

        let total_links: u32 = error_pages
            .iter()
            .map(|p| p.internal_links_received.total)
            .sum();

        // Already sorted by links received descending.
        let examples: Vec<Example> = error_pages
            .iter()
            .take(ctx.thresholds.max_examples)
            .map(|p| Example {
                url: p.url.clone(),
                detail: format!(
                    "status {} — {} inbound links",
                    p.status_code, p.internal_links_received.total
                ),
            })
            .collect();

        Some(Recommendation {
            id: self.id().to_string(),
            priority: Priority::Critical,
            category: "errors".to_string(),
            title: format!(
                "{} error pages still receive internal links",
                error_pages.len()
            ),
            description: "Pages returning a non-200 status receive internal links. Equity sent \
                          to them is lost. Fix or redirect the targets, or repoint the links."
                .to_string(),
            impact: format!(
                "{:.1}% of internal link volume ({} links) points at error pages",
                ctx.aggregates.leakage_rate, total_links
            ),
            examples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::base::testutil::{aggregates_from_pages, page, thresholds};

    #[test]
    fn test_silent_without_error_pages() {
        let aggregates = aggregates_from_pages(vec![page("https://example.com/a", 10.0)]);
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: None,
            thresholds: &thresholds(),
        };
        assert!(ErrorLeakage.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_fires_with_sorted_examples() {
        let mut light = page("https://example.com/gone-light", 1.0);
        light.is_error = true;
        light.status_code = 404;
        light.internal_links_received.total = 2;
        let mut heavy = page("https://example.com/gone-heavy", 1.0);
        heavy.is_error = true;
        heavy.status_code = 410;
        heavy.internal_links_received.total = 9;

        let mut aggregates = aggregates_from_pages(vec![light, heavy]);
        aggregates.leakage_rate = 25.0;
        let ctx = RuleContext {
            aggregates: &aggregates,
            search: None,
            thresholds: &thresholds(),
        };

        let rec = ErrorLeakage.evaluate(&ctx).expect("rule should fire");
        assert_eq!(rec.id, "error-leakage");
        assert_eq!(rec.priority, Priority::Critical);
        assert!(rec.impact.contains("25.0%"));
        assert_eq!(rec.examples[0].url, "https://example.com/gone-heavy");
        assert!(rec.examples[0].detail.contains("9 inbound"));
    }
}
