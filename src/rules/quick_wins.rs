//! Quick-win keywords rule
//!
//! Keywords ranking 5th-12th with real impression volume sit just outside the
//! top results; pointing more internal equity at those pages is the cheapest
//! rank lever available.

use crate::models::{Example, Priority, Recommendation};
use crate::rules::base::{Rule, RuleContext};

pub struct QuickWins;

struct Opportunity<'a> {
    url: &'a str,
    query: &'a str,
    impressions: u64,
    position: f64,
}

impl Rule for QuickWins {
    fn id(&self) -> &'static str {
        "quick-wins"
    }

    fn description(&self) -> &'static str {
        "Keywords ranking just below the top results with strong impressions"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation> {
        // Requires external search data.
        ctx.search?;
        let t = ctx.thresholds;

        let mut opportunities: Vec<Opportunity> = Vec::new();
        for page in &ctx.aggregates.pages {
            let Some(perf) = ctx.search_for(&page.url) else {
                continue;
            };
            for keyword in &perf.keywords {
                if keyword.position >= t.quick_win_min_position
                    && keyword.position <= t.quick_win_max_position
                    && keyword.impressions >= t.min_impressions
                {
                    opportunities.push(Opportunity {
                        url: &page.url,
                        query: &keyword.query,
                        impressions: keyword.impressions,
                        position: keyword.position,
                    });
                }
            }
        }
        if opportunities.is_empty() {
            return None;
        }

        opportunities.sort_by(|a, b| {
            b.impressions
                .cmp(&a.impressions)
                .then_with(|| a.url.cmp(b.url))
        });
        let total_impressions: u64 = opportunities.iter().map(|o| o.impressions).sum();

        let examples: Vec<Example> = opportunities
            .iter()
            .take(t.max_examples)
            .map(|o| Example {
                url: o.url.to_string(),
                detail: format!(
                    "\"{}\" — rank {:.1}, {} impressions",
                    o.query, o.position, o.impressions
                ),
            })
            .collect();

        Some(Recommendation {
            id: self.id().to_string(),
            priority: Priority::High,
            category: "opportunities".to_string(),
            title: format!(
                "{} keywords within striking distance of the top results",
                opportunities.len()
            ),
            description: format!(
                "These pages rank between positions {:.0} and {:.0} for keywords with at least \
                 {} impressions. Adding internal content links toward them is the fastest way to \
                 push them into the top results.",
                t.quick_win_min_position, t.quick_win_max_position, t.min_impressions
            ),
            impact: format!(
                "{} impressions currently land just below the fold",
                total_impressions
            ),
            examples,
        })
    }
}
