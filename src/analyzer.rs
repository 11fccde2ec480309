//! Analysis pipeline facade
//!
//! `Analyzer` wires the stages together: graph construction, score
//! distribution, normalization, aggregation, and the recommendation rules.
//! It owns a validated configuration; everything downstream of construction
//! is infallible.

use crate::config::EngineConfig;
use crate::engine::DistributionEngine;
use crate::error::ConfigError;
use crate::graph::{ExclusionRules, GraphBuilder, GraphSnapshot};
use crate::models::{AnalysisResult, RawLink, SearchPerformance};
use crate::normalize;
use crate::rules::{RuleContext, RuleEngine};
use crate::stats;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// One completed analysis: the serializable result plus the snapshot it was
/// computed from, kept for incremental recomputes.
pub struct Analysis {
    pub result: AnalysisResult,
    pub snapshot: Arc<GraphSnapshot>,
}

/// The full analysis pipeline.
pub struct Analyzer {
    config: EngineConfig,
    exclusions: ExclusionRules,
    rules: RuleEngine,
}

impl Analyzer {
    /// Build an analyzer, rejecting invalid configuration up front.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            exclusions: ExclusionRules::default(),
            rules: RuleEngine::with_default_rules(),
        })
    }

    /// Override the URL exclusion rules.
    pub fn with_exclusions(mut self, exclusions: ExclusionRules) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline over raw link facts.
    ///
    /// `backlinks` maps URLs to external backlink counts; `search` is the
    /// optional per-URL search performance the rules consume.
    pub fn analyze(
        &self,
        links: &[RawLink],
        backlinks: &HashMap<String, u32>,
        search: Option<&HashMap<String, SearchPerformance>>,
    ) -> Analysis {
        info!(raw_links = links.len(), "analysis started");

        let snapshot = GraphBuilder::new(self.exclusions.clone()).build(links, backlinks);
        let snapshot = Arc::new(snapshot);

        let outcome = DistributionEngine::run(&snapshot, &self.config);
        let mut scores = outcome.scores;
        normalize::normalize(&mut scores, self.config.normalize_max);

        let aggregates = stats::aggregate(&snapshot, &scores, &self.config);

        let ctx = RuleContext {
            aggregates: &aggregates,
            search,
            thresholds: &self.config.thresholds,
        };
        let recommendations = self.rules.run(&ctx);

        let total_backlinks: u64 = snapshot.backlinks.iter().map(|&c| u64::from(c)).sum();
        let result = AnalysisResult {
            total_pages: aggregates.pages.len(),
            total_internal_links: snapshot.edge_count,
            total_backlinks,
            domain: snapshot.domain.clone(),
            iterations_run: outcome.iterations,
            converged: outcome.converged,
            pages: aggregates.pages,
            categories: aggregates.categories,
            status_juice: aggregates.status_juice,
            median_score: aggregates.median_score,
            top_backlink_sources: aggregates.top_backlink_sources,
            error_pages_with_links: aggregates.error_pages_with_links,
            leakage_rate: aggregates.leakage_rate,
            recommendations,
            config: self.config.summary(),
        };

        info!(
            pages = result.total_pages,
            internal_links = result.total_internal_links,
            iterations = result.iterations_run,
            converged = result.converged,
            recommendations = result.recommendations.len(),
            "analysis complete"
        );
        Analysis { result, snapshot }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkPosition;

    fn content(source: &str, dest: &str) -> RawLink {
        RawLink::new(source, dest, "link", 200, LinkPosition::Content)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            transmission_rate: 2.0,
            ..Default::default()
        };
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let analyzer = Analyzer::new(EngineConfig::default()).unwrap();
        let analysis = analyzer.analyze(&[], &HashMap::new(), None);

        assert_eq!(analysis.result.total_pages, 0);
        assert_eq!(analysis.result.total_internal_links, 0);
        assert!(analysis.result.domain.is_none());
        assert!(analysis.result.converged);
        assert!(analysis.result.recommendations.is_empty());
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let links = vec![
            content("https://example.com/", "https://example.com/blog"),
            content("https://example.com/", "https://example.com/shop"),
            content("https://example.com/blog", "https://example.com/shop"),
        ];
        let mut backlinks = HashMap::new();
        backlinks.insert("https://example.com/".to_string(), 5);

        let analyzer = Analyzer::new(EngineConfig::default()).unwrap();
        let analysis = analyzer.analyze(&links, &backlinks, None);
        let result = &analysis.result;

        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_internal_links, 3);
        assert_eq!(result.total_backlinks, 5);
        assert_eq!(result.domain.as_deref(), Some("example.com"));
        assert!(result.converged);
        // Scores are normalized: the best page sits at the ceiling.
        assert!((result.pages[0].score - 100.0).abs() < 1e-9);
        assert_eq!(result.pages[0].url, "https://example.com/");
        assert_eq!(result.config.transmission_rate, 0.85);
    }

    #[test]
    fn test_snapshot_supports_recompute_after_analysis() {
        let links = vec![content("https://example.com/", "https://example.com/blog")];
        let mut backlinks = HashMap::new();
        backlinks.insert("https://example.com/".to_string(), 3);

        let analyzer = Analyzer::new(EngineConfig::default()).unwrap();
        let analysis = analyzer.analyze(&links, &backlinks, None);

        let result = crate::recalc::Recalculator::recompute(
            &analysis.snapshot,
            &[],
            &[],
            analyzer.config(),
        );
        assert!(result.deltas.is_empty());
    }
}
