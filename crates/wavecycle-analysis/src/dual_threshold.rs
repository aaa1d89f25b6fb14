//! Dual-amplitude-threshold burst detection with hysteresis.
//!
//! The simpler of the two burst detectors: no cycle segmentation at all.
//! The signal is band-pass filtered, its instantaneous magnitude taken
//! from the Hilbert envelope (amplitude, or squared for power), and
//! normalized by the whole-series average so the thresholds are unit-free
//! relative magnitudes. A single forward scan then applies hysteresis: a
//! burst starts where the relative magnitude exceeds the high threshold
//! and runs until it drops below the low one, which avoids on/off flicker
//! near a single threshold.
//!
//! The output mask is aligned sample-for-sample with the input; filter
//! edge samples (undefined magnitude) are never part of a burst.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wavecycle_core::band::FrequencyBand;
use wavecycle_core::filter::filter_bandpass;
use wavecycle_core::hilbert::amplitude_envelope;
use wavecycle_core::math::{nanmean, nanmedian};

use crate::error::AnalysisError;

/// How the whole-series average magnitude is computed for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Average {
    /// Arithmetic mean of the defined magnitude samples.
    Mean,
    /// Median of the defined magnitude samples (robust to outliers).
    Median,
}

/// Which instantaneous magnitude the thresholds apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Magnitude {
    /// Hilbert envelope amplitude.
    Amplitude,
    /// Squared envelope amplitude.
    Power,
}

/// Validated configuration for the dual-threshold detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualThresholdConfig {
    low_thresh: f32,
    high_thresh: f32,
    avg_type: Average,
    magnitude_type: Magnitude,
}

impl DualThresholdConfig {
    /// Build a config, rejecting negative, non-finite, or inverted
    /// (`low > high`) thresholds eagerly.
    pub fn new(
        low_thresh: f32,
        high_thresh: f32,
        avg_type: Average,
        magnitude_type: Magnitude,
    ) -> Result<Self, AnalysisError> {
        for t in [low_thresh, high_thresh] {
            if !t.is_finite() || t < 0.0 {
                return Err(AnalysisError::BadThreshold(t));
            }
        }
        if low_thresh > high_thresh {
            return Err(AnalysisError::InvertedThresholds {
                low: low_thresh,
                high: high_thresh,
            });
        }
        Ok(Self {
            low_thresh,
            high_thresh,
            avg_type,
            magnitude_type,
        })
    }

    /// Exit (low) threshold in relative magnitude units.
    pub fn low_thresh(&self) -> f32 {
        self.low_thresh
    }

    /// Entry (high) threshold in relative magnitude units.
    pub fn high_thresh(&self) -> f32 {
        self.high_thresh
    }

    /// Normalization average type.
    pub fn avg_type(&self) -> Average {
        self.avg_type
    }

    /// Magnitude type the thresholds apply to.
    pub fn magnitude_type(&self) -> Magnitude {
        self.magnitude_type
    }
}

/// Detect bursts by dual-threshold hysteresis on the band envelope.
///
/// Returns a boolean mask of the same length as `signal`. A degenerate
/// series whose average magnitude is zero or undefined (flat or all-edge
/// signal) yields an all-false mask with a diagnostic log, not an error.
pub fn detect_bursts_dual_threshold(
    signal: &[f32],
    fs: f32,
    config: &DualThresholdConfig,
    band: FrequencyBand,
) -> Result<Vec<bool>, AnalysisError> {
    let filtered = filter_bandpass(signal, fs, band, None, true)?;
    let envelope = amplitude_envelope(&filtered);

    let magnitude: Vec<f32> = match config.magnitude_type {
        Magnitude::Amplitude => envelope,
        Magnitude::Power => envelope.iter().map(|v| v * v).collect(),
    };

    let average = match config.avg_type {
        Average::Mean => nanmean(&magnitude),
        Average::Median => nanmedian(&magnitude),
    };
    let Some(average) = average.filter(|a| *a > 0.0) else {
        debug!("degenerate magnitude series; no bursts detectable");
        return Ok(vec![false; signal.len()]);
    };

    let mut mask = Vec::with_capacity(signal.len());
    let mut in_burst = false;
    for &m in &magnitude {
        let relative = m / average;
        // NaN compares false on both branches, ending any open burst.
        if in_burst {
            in_burst = relative >= config.low_thresh;
        } else {
            in_burst = relative > config.high_thresh;
        }
        mask.push(in_burst);
    }
    Ok(mask)
}
