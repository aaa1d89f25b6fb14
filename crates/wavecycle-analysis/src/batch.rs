//! Batch driver for analyzing many signals in parallel.
//!
//! Every stage of the per-signal pipeline is a pure function over
//! immutable input, so the natural parallelism is across signals:
//! channels, trials, recording segments. The driver fans the units out
//! over rayon's worker pool and collects per-signal results in input
//! order, with no cross-signal synchronization.
//!
//! Cancellation is cooperative and batch-level: a unit checks the shared
//! flag before it starts and reports [`AnalysisError::Cancelled`] if the
//! batch was called off. Units already running finish normally; each one
//! is a short, bounded computation, so mid-algorithm cancellation buys
//! nothing.

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use wavecycle_core::band::FrequencyBand;

use crate::burst::{BurstConfig, CycleBurst, detect_bursts_cycles};
use crate::dual_threshold::{DualThresholdConfig, detect_bursts_dual_threshold};
use crate::error::AnalysisError;
use crate::stats::{BurstStats, compute_burst_stats};

/// Everything the pipeline produced for one signal.
///
/// The cycle table and the dual-threshold mask come from alternative
/// detectors with independent semantics; neither feeds the other.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalReport {
    /// Burst-labeled cycle feature table.
    pub cycles: Vec<CycleBurst>,
    /// Per-sample dual-threshold mask, when a dual config was given.
    pub dual_mask: Option<Vec<bool>>,
    /// Run statistics over the dual-threshold mask.
    pub dual_stats: Option<BurstStats>,
}

/// Run the full pipeline over a batch of signals in parallel.
///
/// Results are returned in input order, one per signal. When `dual` is
/// provided, each report also carries the dual-threshold mask and its run
/// statistics. Signals that fail (too short for the filter kernel, say)
/// produce an `Err` entry without affecting their siblings.
pub fn run_batch(
    signals: &[Vec<f32>],
    fs: f32,
    band: FrequencyBand,
    config: &BurstConfig,
    dual: Option<&DualThresholdConfig>,
    cancel: &AtomicBool,
) -> Vec<Result<SignalReport, AnalysisError>> {
    signals
        .par_iter()
        .map(|signal| {
            if cancel.load(Ordering::Relaxed) {
                debug!("batch cancelled; skipping remaining unit");
                return Err(AnalysisError::Cancelled);
            }
            analyze_one(signal, fs, band, config, dual)
        })
        .collect()
}

fn analyze_one(
    signal: &[f32],
    fs: f32,
    band: FrequencyBand,
    config: &BurstConfig,
    dual: Option<&DualThresholdConfig>,
) -> Result<SignalReport, AnalysisError> {
    let cycles = detect_bursts_cycles(signal, fs, band, config)?;

    let (dual_mask, dual_stats) = match dual {
        Some(dual_config) => {
            let mask = detect_bursts_dual_threshold(signal, fs, dual_config, band)?;
            let stats = compute_burst_stats(&mask, fs);
            (Some(mask), Some(stats))
        }
        None => (None, None),
    };

    Ok(SignalReport {
        cycles,
        dual_mask,
        dual_stats,
    })
}
