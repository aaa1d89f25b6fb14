//! Consistency-based burst classification.
//!
//! Labels each cycle as part of an oscillatory burst or not, using four
//! scale-free metrics bounded in [0, 1]:
//!
//! - **amplitude consistency**: worst-case ratio among the three adjacent
//!   rise/decay amplitude pairs involving this cycle's flanks
//! - **period consistency**: worst-case ratio of this cycle's period
//!   against its two neighbors
//! - **monotonicity**: fraction of rise-flank sample steps going up,
//!   averaged with the fraction of decay-flank steps going down
//! - **band amplitude fraction** (optional): rank of the cycle's mean
//!   band-limited envelope amplitude within the whole signal's cycles,
//!   for callers that want an absolute-amplitude floor on top of the
//!   shape criteria
//!
//! A cycle is a burst *candidate* iff every active metric meets its
//! threshold. Candidates are then confirmed by a run-length floor:
//! isolated cycles pass shape thresholds by chance in noisy signals, so
//! only contiguous candidate runs of at least `min_n_cycles` survive.
//! The candidate test and the run confirmation are separate functions so
//! each can be tested on its own.
//!
//! Cycles at the signal boundary lack a full neighbor set and are always
//! non-burst.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wavecycle_core::band::FrequencyBand;
use wavecycle_core::filter::filter_bandpass;
use wavecycle_core::hilbert::amplitude_envelope;
use wavecycle_core::math::{bounded_ratio, nanmean};

use crate::cycles::{CycleFeatures, assemble_cycles, compute_features};
use crate::error::AnalysisError;
use crate::extrema::find_extrema;

/// Thresholds for the consistency classifier.
///
/// All thresholds live in [0, 1]; `min_n_cycles` is the run-length floor.
/// An `amp_fraction_threshold` of 0 (the default) disables the
/// band-amplitude criterion entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstConfig {
    amp_fraction_threshold: f32,
    amp_consistency_threshold: f32,
    period_consistency_threshold: f32,
    monotonicity_threshold: f32,
    min_n_cycles: usize,
}

impl BurstConfig {
    /// Build a config, validating every threshold eagerly.
    pub fn new(
        amp_fraction_threshold: f32,
        amp_consistency_threshold: f32,
        period_consistency_threshold: f32,
        monotonicity_threshold: f32,
        min_n_cycles: usize,
    ) -> Result<Self, AnalysisError> {
        check_unit_interval("amp_fraction_threshold", amp_fraction_threshold)?;
        check_unit_interval("amp_consistency_threshold", amp_consistency_threshold)?;
        check_unit_interval("period_consistency_threshold", period_consistency_threshold)?;
        check_unit_interval("monotonicity_threshold", monotonicity_threshold)?;
        if min_n_cycles == 0 {
            return Err(AnalysisError::ZeroMinCycles);
        }
        Ok(Self {
            amp_fraction_threshold,
            amp_consistency_threshold,
            period_consistency_threshold,
            monotonicity_threshold,
            min_n_cycles,
        })
    }

    /// Band-amplitude-fraction floor; 0 disables the criterion.
    pub fn amp_fraction_threshold(&self) -> f32 {
        self.amp_fraction_threshold
    }

    /// Amplitude-consistency floor.
    pub fn amp_consistency_threshold(&self) -> f32 {
        self.amp_consistency_threshold
    }

    /// Period-consistency floor.
    pub fn period_consistency_threshold(&self) -> f32 {
        self.period_consistency_threshold
    }

    /// Monotonicity floor.
    pub fn monotonicity_threshold(&self) -> f32 {
        self.monotonicity_threshold
    }

    /// Minimum confirmed burst run length, in cycles.
    pub fn min_n_cycles(&self) -> usize {
        self.min_n_cycles
    }
}

impl Default for BurstConfig {
    /// Conventional starting thresholds: amplitude consistency 0.6, period
    /// consistency 0.75, monotonicity 0.8, three-cycle floor, band
    /// amplitude criterion off.
    fn default() -> Self {
        Self {
            amp_fraction_threshold: 0.0,
            amp_consistency_threshold: 0.6,
            period_consistency_threshold: 0.75,
            monotonicity_threshold: 0.8,
            min_n_cycles: 3,
        }
    }
}

fn check_unit_interval(name: &'static str, value: f32) -> Result<(), AnalysisError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(AnalysisError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}

/// Per-cycle consistency metrics, each in [0, 1] where defined.
///
/// `None` marks boundary cycles missing a neighbor, flanks with undefined
/// samples, or degenerate (zero-amplitude) comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsistencyScores {
    /// Rank of the cycle's band-envelope amplitude among all cycles.
    pub amp_fraction: Option<f32>,
    /// Worst adjacent rise/decay amplitude ratio.
    pub amp_consistency: Option<f32>,
    /// Worst adjacent period ratio.
    pub period_consistency: Option<f32>,
    /// Mean of rise-up and decay-down step fractions.
    pub monotonicity: Option<f32>,
}

/// One row of the burst-labeled feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleBurst {
    /// Per-cycle waveform features.
    pub features: CycleFeatures,
    /// Per-cycle consistency metrics.
    pub scores: ConsistencyScores,
    /// Confirmed burst label.
    pub is_burst: bool,
}

/// Compute consistency scores for every cycle.
///
/// `signal` is the raw signal the cyclepoints index into; the band
/// envelope for the amplitude-fraction metric is computed here from a
/// bandpass + Hilbert pass with edge removal, so cycles overlapping
/// filter edges get `amp_fraction = None`.
pub fn compute_scores(
    signal: &[f32],
    fs: f32,
    band: FrequencyBand,
    features: &[CycleFeatures],
) -> Result<Vec<ConsistencyScores>, AnalysisError> {
    if features.is_empty() {
        return Ok(Vec::new());
    }

    let filtered = filter_bandpass(signal, fs, band, None, true)?;
    let envelope = amplitude_envelope(&filtered);

    let band_amps: Vec<Option<f32>> = features
        .iter()
        .map(|f| nanmean(&envelope[f.points.trough..f.points.next_trough]))
        .collect();
    let amp_fractions = fractional_ranks(&band_amps);

    let scores = features
        .iter()
        .enumerate()
        .map(|(i, f)| ConsistencyScores {
            amp_fraction: amp_fractions[i],
            amp_consistency: amp_consistency(features, i),
            period_consistency: period_consistency(features, i),
            monotonicity: monotonicity(signal, f),
        })
        .collect();
    Ok(scores)
}

/// Fractional rank in [0, 1] of each defined value among all defined
/// values. A single defined value ranks 1.0 (it is its own maximum).
fn fractional_ranks(values: &[Option<f32>]) -> Vec<Option<f32>> {
    let defined: Vec<f32> = values.iter().filter_map(|v| *v).collect();
    let n = defined.len();
    values
        .iter()
        .map(|v| {
            v.map(|x| {
                if n <= 1 {
                    return 1.0;
                }
                let below = defined.iter().filter(|&&d| d < x).count();
                below as f32 / (n - 1) as f32
            })
        })
        .collect()
}

/// Worst-case ratio among the three adjacent rise/decay amplitude pairs
/// involving cycle `i`'s flanks: (rise_i, decay_i), (rise_i, decay_{i-1}),
/// (decay_i, rise_{i+1}). Boundary cycles have no full neighbor set and
/// score `None`.
fn amp_consistency(features: &[CycleFeatures], i: usize) -> Option<f32> {
    if i == 0 || i + 1 >= features.len() {
        return None;
    }
    let rise = features[i].rise_amplitude;
    let decay = features[i].decay_amplitude;
    let prev_decay = features[i - 1].decay_amplitude;
    let next_rise = features[i + 1].rise_amplitude;

    let pairs = [
        bounded_ratio(rise, decay)?,
        bounded_ratio(rise, prev_decay)?,
        bounded_ratio(decay, next_rise)?,
    ];
    pairs.iter().copied().reduce(f32::min)
}

/// Worst of the two adjacent period ratios. Boundary cycles score `None`.
fn period_consistency(features: &[CycleFeatures], i: usize) -> Option<f32> {
    if i == 0 || i + 1 >= features.len() {
        return None;
    }
    let prev = features[i - 1].period_samples as f32;
    let this = features[i].period_samples as f32;
    let next = features[i + 1].period_samples as f32;

    let a = bounded_ratio(prev, this)?;
    let b = bounded_ratio(this, next)?;
    Some(a.min(b))
}

/// Fraction of rise-flank steps with positive sign, averaged with the
/// fraction of decay-flank steps with negative sign. `None` when a flank
/// contains undefined samples or has no steps.
fn monotonicity(signal: &[f32], f: &CycleFeatures) -> Option<f32> {
    let rise = step_sign_fraction(&signal[f.points.trough..=f.points.peak], true)?;
    let decay = step_sign_fraction(&signal[f.points.peak..=f.points.next_trough], false)?;
    Some((rise + decay) / 2.0)
}

fn step_sign_fraction(span: &[f32], positive: bool) -> Option<f32> {
    if span.len() < 2 || span.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let total = span.len() - 1;
    let matching = span
        .windows(2)
        .filter(|w| {
            let diff = w[1] - w[0];
            if positive { diff > 0.0 } else { diff < 0.0 }
        })
        .count();
    Some(matching as f32 / total as f32)
}

/// Per-cycle candidate test: every active metric defined and at or above
/// its threshold, and no data-quality issue on the cycle.
pub fn burst_candidates(
    features: &[CycleFeatures],
    scores: &[ConsistencyScores],
    config: &BurstConfig,
) -> Vec<bool> {
    features
        .iter()
        .zip(scores)
        .map(|(f, s)| {
            if !f.is_clean() {
                return false;
            }
            let amp_ok = s
                .amp_consistency
                .is_some_and(|v| v >= config.amp_consistency_threshold);
            let period_ok = s
                .period_consistency
                .is_some_and(|v| v >= config.period_consistency_threshold);
            let mono_ok = s
                .monotonicity
                .is_some_and(|v| v >= config.monotonicity_threshold);
            // Threshold 0 keeps the band-amplitude criterion inactive.
            let frac_ok = config.amp_fraction_threshold == 0.0
                || s.amp_fraction
                    .is_some_and(|v| v >= config.amp_fraction_threshold);
            amp_ok && period_ok && mono_ok && frac_ok
        })
        .collect()
}

/// Run-length confirmation: demote candidate runs shorter than
/// `min_n_cycles` to non-burst. A hard floor, not a soft penalty.
pub fn confirm_runs(candidates: &[bool], min_n_cycles: usize) -> Vec<bool> {
    let mut confirmed = vec![false; candidates.len()];
    let mut i = 0;
    while i < candidates.len() {
        if candidates[i] {
            let start = i;
            while i < candidates.len() && candidates[i] {
                i += 1;
            }
            if i - start >= min_n_cycles {
                for slot in &mut confirmed[start..i] {
                    *slot = true;
                }
            }
        } else {
            i += 1;
        }
    }
    confirmed
}

/// Full cycle-by-cycle burst pipeline for one signal.
///
/// Filter -> extrema -> cyclepoints -> features -> consistency scores ->
/// candidate test -> run confirmation. Degenerate signals (no extrema, no
/// cycles) yield an empty table, not an error.
pub fn detect_bursts_cycles(
    signal: &[f32],
    fs: f32,
    band: FrequencyBand,
    config: &BurstConfig,
) -> Result<Vec<CycleBurst>, AnalysisError> {
    let extrema = find_extrema(signal, fs, band)?;
    let cycles = assemble_cycles(signal, &extrema);
    if cycles.is_empty() {
        debug!("no cycles found; returning empty burst table");
        return Ok(Vec::new());
    }

    let features = compute_features(signal, fs, &cycles);
    let scores = compute_scores(signal, fs, band, &features)?;
    let candidates = burst_candidates(&features, &scores, config);
    let confirmed = confirm_runs(&candidates, config.min_n_cycles);

    Ok(features
        .into_iter()
        .zip(scores)
        .zip(confirmed)
        .map(|((features, scores), is_burst)| CycleBurst {
            features,
            scores,
            is_burst,
        })
        .collect())
}
