//! Recommendation rules
//!
//! A fixed battery of independent checks over the final aggregates. Each rule
//! either emits one recommendation or stays silent; the engine runs them all
//! and orders the output by priority.
//!
//! Current battery:
//! - `ErrorLeakage` (critical) — internal links pointing at error pages
//! - `QuickWins` (high) — keywords just below the top results
//! - `WastedAuthority` (medium) — high-equity pages ranking for nothing
//! - `AuthorityHoarding` (medium) — backlinked pages that barely link out
//! - `OrphanedPages` (low) — pages starved of content links

mod authority_hoarding;
mod base;
mod error_leakage;
mod orphaned_pages;
mod quick_wins;
mod wasted_authority;

pub use authority_hoarding::AuthorityHoarding;
pub use base::{Rule, RuleContext};
pub use error_leakage::ErrorLeakage;
pub use orphaned_pages::OrphanedPages;
pub use quick_wins::QuickWins;
pub use wasted_authority::WastedAuthority;

use crate::models::Recommendation;
use tracing::debug;

/// Runs the rule battery and orders the output.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// The standard battery, in registration order.
    pub fn with_default_rules() -> Self {
        Self {
            rules: vec![
                Box::new(ErrorLeakage),
                Box::new(QuickWins),
                Box::new(WastedAuthority),
                Box::new(AuthorityHoarding),
                Box::new(OrphanedPages),
            ],
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every rule against the context, highest priority first.
    ///
    /// Registration order breaks priority ties (stable sort).
    pub fn run(&self, ctx: &RuleContext) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let result = rule.evaluate(ctx);
                debug!(rule = rule.id(), fired = result.is_some(), "rule evaluated");
                result
            })
            .collect();
        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        recommendations
    }
}
