//! Link-equity distribution engine
//!
//! Models how ranking authority ("juice") flows through a site's internal
//! link graph. External backlinks inject equity every iteration; pages
//! forward a configurable fraction of what they hold across their outgoing
//! links, weighted by link position, until the scores reach a fixed point.
//! The final scores feed statistics, a recommendation rule battery, and
//! incremental what-if recomputes.
//!
//! # Pipeline
//!
//! ```text
//! RawLink facts ──► GraphBuilder ──► GraphSnapshot (immutable)
//!                                        │
//!                                        ▼
//!                              DistributionEngine (fixed point)
//!                                        │
//!                                        ▼
//!                            normalize ──► aggregate ──► RuleEngine
//!                                        │
//!                                        ▼
//!                                  AnalysisResult
//! ```
//!
//! # Example
//!
//! ```
//! use linkequity::{Analyzer, EngineConfig, LinkPosition, RawLink};
//! use std::collections::HashMap;
//!
//! let links = vec![
//!     RawLink::new(
//!         "https://example.com/",
//!         "https://example.com/blog",
//!         "our blog",
//!         200,
//!         LinkPosition::Content,
//!     ),
//! ];
//! let mut backlinks = HashMap::new();
//! backlinks.insert("https://example.com/".to_string(), 12);
//!
//! let analyzer = Analyzer::new(EngineConfig::default()).unwrap();
//! let analysis = analyzer.analyze(&links, &backlinks, None);
//! assert_eq!(analysis.result.total_pages, 2);
//! ```

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod models;
pub mod normalize;
pub mod recalc;
pub mod rules;
pub mod stats;

pub use analyzer::{Analysis, Analyzer};
pub use config::{EngineConfig, RuleThresholds};
pub use engine::{DistributionEngine, DistributionOutcome};
pub use error::ConfigError;
pub use graph::{ExclusionRules, GraphBuilder, GraphSnapshot, SnapshotStore};
pub use models::{
    AnalysisResult, LinkPosition, PageResult, Priority, RawLink, Recommendation, ScoreDelta,
    SearchPerformance,
};
pub use recalc::{LinkChange, RecalcResult, Recalculator};
