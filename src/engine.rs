//! Iterative link-equity distribution
//!
//! The fixed-point loop at the heart of the crate. Each pass rebuilds the
//! score vector from scratch: backlinks re-inject their equity every single
//! iteration (external authority is a continuous source, not a one-shot
//! seed), then every page with a positive previous score forwards its
//! transmittable share across its outgoing links, weighted by link position.
//!
//! Two deliberate departures from textbook PageRank:
//! - dangling pages lose their transmittable share instead of spreading it
//!   uniformly; the authority-hoarding rule measures exactly that loss;
//! - the `(1 - transmission_rate)` remainder is attenuation per hop, gone for
//!   good.

use crate::config::EngineConfig;
use crate::graph::{GraphSnapshot, OutLink};
use crate::models::LinkPosition;
use tracing::{debug, info};

/// Result of running the distribution loop.
#[derive(Debug, Clone)]
pub struct DistributionOutcome {
    /// Raw (pre-normalization) score per page id.
    pub scores: Vec<f64>,
    /// Passes actually executed.
    pub iterations: u32,
    /// Whether `max_delta` dropped below tolerance before the iteration cap.
    pub converged: bool,
    /// The last max per-page score change observed.
    pub last_max_delta: f64,
}

/// The score-propagation engine. Stateless; all state lives in the vectors
/// it derives per call.
pub struct DistributionEngine;

impl DistributionEngine {
    /// Run the fixed-point loop over a snapshot.
    pub fn run(snapshot: &GraphSnapshot, config: &EngineConfig) -> DistributionOutcome {
        Self::run_raw(&snapshot.adjacency, &snapshot.backlinks, config)
    }

    /// Run over explicit adjacency and backlink vectors.
    ///
    /// The incremental recalculator uses this entry point with a mutated copy
    /// of a snapshot's adjacency; semantics are identical to [`Self::run`].
    pub fn run_raw(
        adjacency: &[Vec<OutLink>],
        backlinks: &[u32],
        config: &EngineConfig,
    ) -> DistributionOutcome {
        let node_count = adjacency.len();
        info!(
            pages = node_count,
            max_iterations = config.max_iterations,
            tolerance = config.tolerance,
            "starting distribution"
        );

        let mut scores = vec![0.0f64; node_count];
        let mut iterations = 0u32;
        let mut converged = false;
        let mut last_max_delta = 0.0f64;

        for pass in 1..=config.max_iterations {
            let mut next = vec![0.0f64; node_count];

            // The sole energy source: backlinks inject the same equity every
            // pass.
            for (id, &count) in backlinks.iter().enumerate() {
                if count > 0 {
                    next[id] += f64::from(count) * config.backlink_score;
                }
            }

            // Forward each page's transmittable share from the previous pass.
            for (source, links) in adjacency.iter().enumerate() {
                let previous = scores[source];
                if previous <= 0.0 {
                    continue;
                }
                let juice = previous * config.transmission_rate;

                let content_links = links
                    .iter()
                    .filter(|l| l.position == LinkPosition::Content)
                    .count();
                let other_links = links.len() - content_links;
                let total_weight = content_links as f64 * config.content_weight
                    + other_links as f64 * config.navigation_weight;
                if total_weight <= 0.0 {
                    // Dangling page: the whole share is lost this pass.
                    continue;
                }

                let per_weight_unit = juice / total_weight;
                for link in links {
                    let weight = if link.position == LinkPosition::Content {
                        config.content_weight
                    } else {
                        config.navigation_weight
                    };
                    next[link.target] += per_weight_unit * weight;
                }
            }

            let max_delta = scores
                .iter()
                .zip(&next)
                .map(|(old, new)| (new - old).abs())
                .fold(0.0f64, f64::max);

            scores = next;
            iterations = pass;
            last_max_delta = max_delta;
            debug!(pass, max_delta, "distribution pass complete");

            if max_delta < config.tolerance {
                converged = true;
                break;
            }
        }

        info!(
            iterations,
            converged, last_max_delta, "distribution finished"
        );
        DistributionOutcome {
            scores,
            iterations,
            converged,
            last_max_delta,
        }
    }
}
