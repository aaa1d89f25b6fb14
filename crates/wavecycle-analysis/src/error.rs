//! Error types for the analysis layer.
//!
//! Configuration errors are rejected eagerly when a config struct is
//! built, so the analysis functions themselves only surface signal-level
//! failures (propagated from `wavecycle-core`) and batch cancellation.
//! Degenerate inputs -- too few zero crossings, flat signals, boundary
//! cycles -- are not errors; they produce empty outputs or excluded
//! cycles instead.

use thiserror::Error;
use wavecycle_core::CoreError;

/// Errors that can occur during cycle and burst analysis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// A signal-primitive operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A [0, 1]-bounded threshold was configured outside its range.
    #[error("threshold '{name}' = {value} must lie in [0, 1]")]
    ThresholdOutOfRange {
        /// Name of the offending threshold.
        name: &'static str,
        /// The configured value.
        value: f32,
    },

    /// The minimum burst run length must be at least one cycle.
    #[error("min_n_cycles must be >= 1")]
    ZeroMinCycles,

    /// Dual-threshold hysteresis requires `low_thresh <= high_thresh`.
    #[error("dual thresholds inverted: low {low} > high {high}")]
    InvertedThresholds {
        /// Configured low (exit) threshold.
        low: f32,
        /// Configured high (entry) threshold.
        high: f32,
    },

    /// Dual thresholds are relative magnitudes and must be non-negative
    /// and finite.
    #[error("dual threshold must be finite and non-negative, got {0}")]
    BadThreshold(f32),

    /// The batch driver was cancelled before this unit ran.
    #[error("batch unit cancelled before completion")]
    Cancelled,
}
