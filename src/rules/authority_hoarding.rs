//! Authority hoarding rule
//!
//! Pages with external backlinks pull fresh equity into the site every
//! iteration. When such a page links out to almost nothing, that inflow
//! stops with it instead of strengthening the rest of the site.

use crate::models::{Example, Priority, Recommendation};
use crate::rules::base::{Rule, RuleContext};

pub struct AuthorityHoarding;

impl Rule for AuthorityHoarding {
    fn id(&self) -> &'static str {
        "authority-hoarding"
    }

    fn description(&self) -> &'static str {
        "Backlinked pages that barely link out keep their equity to themselves"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Option<Recommendation> {
        let t = ctx.thresholds;

        let mut hoarders: Vec<_> = ctx
            .aggregates
            .pages
            .iter()
            .filter(|p| p.backlinks_count > 0 && p.internal_links_sent < t.min_outgoing_links)
            .collect();
        if hoarders.is_empty() {
            return None;
        }
        hoarders.sort_by(|a, b| {
            b.backlinks_count
                .cmp(&a.backlinks_count)
                .then_with(|| a.url.cmp(&b.url))
        });

        let total_backlinks: u64 = hoarders.iter().map(|p| u64::from(p.backlinks_count)).sum();

        let examples: Vec<Example> = hoarders
            .iter()
            .take(t.max_examples)
            .map(|p| Example {
                url: p.url.clone(),
                detail: format!(
                    "{} backlinks, only {} outgoing internal links",
                    p.backlinks_count, p.internal_links_sent
                ),
            })
            .collect();

        Some(Recommendation {
            id: self.id().to_string(),
            priority: Priority::Medium,
            category: "redistribution".to_string(),
            title: format!("{} backlinked pages barely link out", hoarders.len()),
            description: format!(
                "Pages earning external backlinks send fewer than {} internal links. Adding \
                 contextual links from them spreads their inflow across the site.",
                t.min_outgoing_links
            ),
            impact: format!(
                "{} external backlinks feed pages that pass little of it on",
                total_backlinks
            ),
            examples,
        })
    }
}
