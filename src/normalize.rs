//! Score normalization
//!
//! Linear rescale of the final score vector so the best page sits exactly at
//! the configured ceiling. A zero maximum leaves everything at zero.

use tracing::debug;

/// Rescale `scores` in place so that `max(scores) == ceiling`.
///
/// No-op when every score is zero, guarding the division.
pub fn normalize(scores: &mut [f64], ceiling: f64) {
    let max_score = scores.iter().copied().fold(0.0f64, f64::max);
    if max_score <= 0.0 {
        debug!("all scores zero, skipping normalization");
        return;
    }
    let factor = ceiling / max_score;
    for score in scores.iter_mut() {
        *score *= factor;
    }
    debug!(max_score, ceiling, "normalized scores");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_hits_ceiling() {
        let mut scores = vec![2.0, 8.0, 4.0];
        normalize(&mut scores, 100.0);
        assert!((scores[1] - 100.0).abs() < 1e-9);
        assert!((scores[0] - 25.0).abs() < 1e-9);
        assert!((scores[2] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_left_untouched() {
        let mut scores = vec![0.0, 0.0];
        normalize(&mut scores, 100.0);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_slice() {
        let mut scores: Vec<f64> = Vec::new();
        normalize(&mut scores, 100.0);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_scores_stay_non_negative() {
        let mut scores = vec![0.0, 1e-12, 3.5];
        normalize(&mut scores, 50.0);
        assert!(scores.iter().all(|&s| s >= 0.0));
        assert!((scores[2] - 50.0).abs() < 1e-9);
    }
}
