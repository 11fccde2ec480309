//! Error types
//!
//! The engine's runtime path is infallible: lookup misses are skipped and
//! degenerate divisions short-circuit to defined values. The only errors that
//! can surface are configuration errors, reported at construction.

use thiserror::Error;

/// Rejected configuration. The engine never runs with invalid parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("transmission_rate must be in (0, 1], got {0}")]
    TransmissionRate(f64),

    #[error("max_iterations must be greater than zero")]
    MaxIterations,

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    NegativeWeight { field: &'static str, value: f64 },

    #[error("content_weight and navigation_weight cannot both be zero")]
    ZeroWeights,
}
