//! Orphaned pages rule
//!
//! Pages receiving almost no content links never accumulate equity. A few of
//! them is normal churn; past a threshold it signals a structural gap in the
//! internal linking.

use crate::models::{Example, Priority, Recommendation};
use crate::rules::base::{Rule, RuleContext};

pub struct OrphanedPages;

impl Rule for OrphanedPages {
    fn id(&self) -> &'static str {
        "orphaned-pages"
    }

    fn description(&self) -> &'static str {
        "Pages starved of content links never accumulate equity"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation> {
        let t = ctx.thresholds;
        let median = ctx.median();

        let mut orphans: Vec<_> = ctx
            .aggregates
            .pages
            .iter()
            .filter(|p| {
                !p.is_error
                    && p.internal_links_received.content < t.orphan_max_content_links
                    && p.score < median
            })
            .collect();
        // Below the threshold this is normal churn, not a structural problem.
        if orphans.len() <= t.orphan_min_count {
            return None;
        }
        orphans.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.url.cmp(&b.url))
        });

        let examples: Vec<Example> = orphans
            .iter()
            .take(t.max_examples)
            .map(|p| Example {
                url: p.url.clone(),
                detail: format!(
                    "{} content links received, score {:.1}",
                    p.internal_links_received.content, p.score
                ),
            })
            .collect();

        Some(Recommendation {
            id: self.id().to_string(),
            priority: Priority::Low,
            category: "structure".to_string(),
            title: format!("{} pages are nearly orphaned", orphans.len()),
            description: format!(
                "These pages receive fewer than {} content links and score below the site \
                 median ({:.1}). Link to them from related content or consider consolidating \
                 them.",
                t.orphan_max_content_links, median
            ),
            impact: format!(
                "{} pages sit outside the internal linking structure",
                orphans.len()
            ),
            examples,
        })
    }
}
