//! Incremental what-if recompute
//!
//! Answers "what happens to the scores if these links were added or removed"
//! against a published snapshot, without re-parsing raw inputs. The snapshot
//! itself is never mutated: only the adjacency copy changes, so the same
//! snapshot serves any number of concurrent what-if requests.

use crate::config::EngineConfig;
use crate::engine::DistributionEngine;
use crate::graph::{GraphSnapshot, OutLink};
use crate::models::{LinkPosition, ScoreDelta};
use crate::normalize;
use tracing::{debug, info, warn};

/// Score changes below this are floating-point noise, not movement.
const DELTA_EPSILON: f64 = 1e-6;

/// One hypothetical link edit, by URL.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LinkChange {
    pub source: String,
    pub destination: String,
    pub position: LinkPosition,
}

/// Outcome of one incremental recompute.
#[derive(Debug, Clone)]
pub struct RecalcResult {
    /// Normalized score per URL under the modified graph, score descending.
    pub scores: Vec<(String, f64)>,
    /// Pages whose score moved, largest absolute movement first.
    pub deltas: Vec<ScoreDelta>,
}

pub struct Recalculator;

impl Recalculator {
    /// Recompute scores on a copy of the snapshot's graph with the given
    /// edits applied.
    ///
    /// Edits referencing URLs the snapshot never interned are skipped, as are
    /// self-links; removals that match nothing are ignored. Each removal
    /// matches at most one occurrence of (source, destination, position).
    pub fn recompute(
        snapshot: &GraphSnapshot,
        added: &[LinkChange],
        removed: &[LinkChange],
        config: &EngineConfig,
    ) -> RecalcResult {
        let mut adjacency = snapshot.adjacency.clone();

        for change in removed {
            let (Some(source), Some(target)) = (
                snapshot.page_id(&change.source),
                snapshot.page_id(&change.destination),
            ) else {
                warn!(source = %change.source, destination = %change.destination,
                      "removal references unknown URL, skipping");
                continue;
            };
            let links = &mut adjacency[source];
            match links
                .iter()
                .position(|l| l.target == target && l.position == change.position)
            {
                Some(index) => {
                    links.remove(index);
                }
                None => {
                    debug!(source = %change.source, destination = %change.destination,
                           "removal matches no edge, ignoring");
                }
            }
        }

        for change in added {
            let (Some(source), Some(target)) = (
                snapshot.page_id(&change.source),
                snapshot.page_id(&change.destination),
            ) else {
                warn!(source = %change.source, destination = %change.destination,
                      "addition references unknown URL, skipping");
                continue;
            };
            if source == target {
                debug!(url = %change.source, "skipping hypothetical self-link");
                continue;
            }
            adjacency[source].push(OutLink {
                target,
                position: change.position,
            });
        }

        // Baseline and modified runs share config, so their normalized scores
        // are directly comparable.
        let mut baseline = DistributionEngine::run(snapshot, config).scores;
        normalize::normalize(&mut baseline, config.normalize_max);
        let mut modified =
            DistributionEngine::run_raw(&adjacency, &snapshot.backlinks, config).scores;
        normalize::normalize(&mut modified, config.normalize_max);

        let mut deltas: Vec<ScoreDelta> = snapshot
            .page_ids()
            .filter_map(|id| {
                let old_score = baseline[id];
                let new_score = modified[id];
                let delta = new_score - old_score;
                (delta.abs() > DELTA_EPSILON).then(|| ScoreDelta {
                    url: snapshot.url(id).to_string(),
                    old_score,
                    new_score,
                    delta,
                })
            })
            .collect();
        deltas.sort_by(|a, b| {
            b.delta
                .abs()
                .partial_cmp(&a.delta.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.url.cmp(&b.url))
        });

        let mut scores: Vec<(String, f64)> = snapshot
            .page_ids()
            .map(|id| (snapshot.url(id).to_string(), modified[id]))
            .collect();
        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        info!(
            added = added.len(),
            removed = removed.len(),
            moved = deltas.len(),
            "incremental recompute complete"
        );
        RecalcResult { scores, deltas }
    }
}
