//! Engine configuration
//!
//! All knobs for the distribution algorithm and the recommendation rules.
//! Invalid values are rejected at construction, never silently clamped:
//! the engine must not run with parameters that would make the fixed point
//! meaningless.

use crate::error::ConfigError;
use crate::models::ConfigSummary;
use serde::Deserialize;

/// Configuration for the distribution algorithm.
///
/// ```toml
/// backlink_score = 10.0
/// transmission_rate = 0.85
/// content_weight = 9.0
/// navigation_weight = 1.0
/// max_iterations = 50
/// tolerance = 0.001
/// normalize_max = 100.0
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Equity injected per external backlink, every iteration.
    pub backlink_score: f64,
    /// Fraction of a page's score forwarded per iteration; the remainder is
    /// lost, modeling attenuation per hop.
    pub transmission_rate: f64,
    /// Redistribution weight of a content-position link.
    pub content_weight: f64,
    /// Redistribution weight of a navigation/other-position link.
    pub navigation_weight: f64,
    /// Hard cap on distribution passes.
    pub max_iterations: u32,
    /// Convergence threshold on the max per-page score change.
    pub tolerance: f64,
    /// Ceiling the final scores are rescaled to.
    pub normalize_max: f64,
    #[serde(rename = "rules")]
    pub thresholds: RuleThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backlink_score: 10.0,
            transmission_rate: 0.85,
            content_weight: 9.0,
            navigation_weight: 1.0,
            max_iterations: 50,
            tolerance: 0.001,
            normalize_max: 100.0,
            thresholds: RuleThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration, rejecting degenerate parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.transmission_rate > 0.0 && self.transmission_rate <= 1.0) {
            return Err(ConfigError::TransmissionRate(self.transmission_rate));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::MaxIterations);
        }
        if !(self.tolerance > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "tolerance",
                value: self.tolerance,
            });
        }
        if !(self.normalize_max > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "normalize_max",
                value: self.normalize_max,
            });
        }
        if self.backlink_score < 0.0 || !self.backlink_score.is_finite() {
            return Err(ConfigError::NegativeWeight {
                field: "backlink_score",
                value: self.backlink_score,
            });
        }
        if self.content_weight < 0.0 || !self.content_weight.is_finite() {
            return Err(ConfigError::NegativeWeight {
                field: "content_weight",
                value: self.content_weight,
            });
        }
        if self.navigation_weight < 0.0 || !self.navigation_weight.is_finite() {
            return Err(ConfigError::NegativeWeight {
                field: "navigation_weight",
                value: self.navigation_weight,
            });
        }
        if self.content_weight == 0.0 && self.navigation_weight == 0.0 {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(())
    }

    /// Configuration echo included in every analysis result.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            backlink_score: self.backlink_score,
            transmission_rate: self.transmission_rate,
            content_weight: self.content_weight,
            navigation_weight: self.navigation_weight,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }
}

/// Thresholds for the recommendation rules.
///
/// Defaults match the reference behavior; all are overridable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Lowest ranking position that counts as a quick-win opportunity.
    pub quick_win_min_position: f64,
    /// Highest ranking position that counts as a quick-win opportunity.
    pub quick_win_max_position: f64,
    /// Minimum impressions for a keyword to be considered at all.
    pub min_impressions: u64,
    /// Pages with backlinks but fewer outgoing links than this hoard authority.
    pub min_outgoing_links: u32,
    /// Pages receiving fewer content links than this are orphan candidates.
    pub orphan_max_content_links: u32,
    /// Orphan rule only fires when more than this many candidates exist.
    pub orphan_min_count: usize,
    /// Cap on supporting examples per recommendation.
    pub max_examples: usize,
    /// Size of the top-backlink-sources list.
    pub top_sources: usize,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            quick_win_min_position: 5.0,
            quick_win_max_position: 12.0,
            min_impressions: 50,
            min_outgoing_links: 5,
            orphan_max_content_links: 2,
            orphan_min_count: 5,
            max_examples: 5,
            top_sources: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_transmission_rate() {
        let config = EngineConfig {
            transmission_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TransmissionRate(_))
        ));
    }

    #[test]
    fn test_rejects_transmission_rate_above_one() {
        let config = EngineConfig {
            transmission_rate: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = EngineConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MaxIterations)));
    }

    #[test]
    fn test_rejects_non_positive_tolerance_and_ceiling() {
        let config = EngineConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            normalize_max: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_both_weights_zero() {
        let config = EngineConfig {
            content_weight: 0.0,
            navigation_weight: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWeights)));
    }

    #[test]
    fn test_deserialize_partial_toml_shape() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"transmission_rate": 0.5, "rules": {"min_impressions": 100}}"#,
        )
        .unwrap();
        assert_eq!(config.transmission_rate, 0.5);
        assert_eq!(config.thresholds.min_impressions, 100);
        // Untouched fields keep defaults
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }
}
