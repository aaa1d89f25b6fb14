//! Cycle assembly and per-cycle feature computation.
//!
//! A cycle is the half-open span from one trough to the next, containing
//! exactly one peak and one rise/decay flank midpoint. Assembly pairs the
//! localized extrema into [`CyclePoints`] tuples; feature computation then
//! derives amplitude, period, and the two symmetry measures per cycle.
//!
//! Anything suspicious about a cycle -- a missing flank midpoint, a
//! negative flank amplitude, a symmetry ratio outside [0, 1], undefined
//! samples inside the span -- is recorded as a [`CycleIssue`] on the
//! record. Values are never clamped or silently dropped: a negative
//! amplitude means the extrema localization disagrees with the data, and
//! the caller needs to see that to fix the filter or band choice.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extrema::Extrema;
use crate::zerox::{Flank, flank_midpoint};

/// The four (plus closing trough) sample indices defining one cycle.
///
/// Invariant for a clean cycle:
/// `trough < rise < peak < decay < next_trough`, strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePoints {
    /// Opening trough sample index.
    pub trough: usize,
    /// Rise flank midpoint; `None` when the flank never crosses it.
    pub rise: Option<usize>,
    /// Peak sample index.
    pub peak: usize,
    /// Decay flank midpoint; `None` when the flank never crosses it.
    pub decay: Option<usize>,
    /// Closing trough sample index (opening trough of the next cycle).
    pub next_trough: usize,
}

/// Data-quality diagnostics attached to a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleIssue {
    /// The rise or decay flank never crossed its midpoint voltage.
    MissingFlankMidpoint,
    /// Voltage at the peak is below the opening trough.
    NegativeRiseAmplitude,
    /// Voltage at the peak is below the closing trough.
    NegativeDecayAmplitude,
    /// A symmetry ratio fell outside [0, 1].
    SymmetryOutOfRange,
    /// The cycle span contains undefined (NaN) samples, e.g. filter edges.
    TouchesFilterEdge,
    /// Cyclepoints are not strictly ordered.
    DisorderedPoints,
}

/// Per-cycle feature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleFeatures {
    /// The cyclepoint indices this record was computed from.
    pub points: CyclePoints,
    /// Period in samples (trough to trough).
    pub period_samples: usize,
    /// Period in seconds.
    pub period_s: f32,
    /// Rise voltage excursion, `signal[peak] - signal[trough]`.
    pub rise_amplitude: f32,
    /// Decay voltage excursion, `signal[peak] - signal[next_trough]`.
    pub decay_amplitude: f32,
    /// Mean of rise and decay excursions.
    pub amplitude: f32,
    /// Fraction of the period spent rising, in [0, 1] for clean cycles.
    pub time_rdsym: f32,
    /// Fraction of the period spent above the flank-midpoint voltage;
    /// `None` when either flank midpoint is missing.
    pub time_ptsym: Option<f32>,
    /// Data-quality diagnostics; empty for a clean cycle.
    pub issues: Vec<CycleIssue>,
}

impl CycleFeatures {
    /// True when no data-quality issue was recorded.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Pair extrema into trough-to-trough cycles and locate flank midpoints.
///
/// Peaks before the first trough or after the last are dropped; cycles
/// are contiguous, non-overlapping, and ordered by time. A trough pair
/// with no peak between it (possible only when extrema interleaving was
/// violated upstream) is skipped.
pub fn assemble_cycles(signal: &[f32], extrema: &Extrema) -> Vec<CyclePoints> {
    if extrema.troughs.len() < 2 {
        return Vec::new();
    }

    let mut cycles = Vec::with_capacity(extrema.troughs.len() - 1);
    for pair in extrema.troughs.windows(2) {
        let (trough, next_trough) = (pair[0], pair[1]);
        let Some(peak) = extrema
            .peaks
            .iter()
            .copied()
            .find(|&p| p > trough && p < next_trough)
        else {
            continue;
        };

        cycles.push(CyclePoints {
            trough,
            rise: flank_midpoint(signal, trough, peak, Flank::Rise),
            peak,
            decay: flank_midpoint(signal, peak, next_trough, Flank::Decay),
            next_trough,
        });
    }
    cycles
}

/// Compute one [`CycleFeatures`] record per cycle.
///
/// `signal` must be the same array the cyclepoints index into. Records for
/// cycles with data-quality problems carry the uncorrected values plus the
/// corresponding [`CycleIssue`] flags.
pub fn compute_features(signal: &[f32], fs: f32, cycles: &[CyclePoints]) -> Vec<CycleFeatures> {
    cycles
        .iter()
        .map(|&points| features_for(signal, fs, points))
        .collect()
}

fn features_for(signal: &[f32], fs: f32, points: CyclePoints) -> CycleFeatures {
    let mut issues = Vec::new();

    if points.rise.is_none() || points.decay.is_none() {
        issues.push(CycleIssue::MissingFlankMidpoint);
    }

    // Every span and difference below assumes trough < peak < next_trough
    // within bounds; a disordered tuple gets the flag and no features.
    if !well_ordered(points) || points.next_trough >= signal.len() {
        issues.push(CycleIssue::DisorderedPoints);
        warn!(
            trough = points.trough,
            peak = points.peak,
            next_trough = points.next_trough,
            "disordered cyclepoints, features not computed"
        );
        return CycleFeatures {
            points,
            period_samples: 0,
            period_s: f32::NAN,
            rise_amplitude: f32::NAN,
            decay_amplitude: f32::NAN,
            amplitude: f32::NAN,
            time_rdsym: f32::NAN,
            time_ptsym: None,
            issues,
        };
    }

    if signal[points.trough..=points.next_trough]
        .iter()
        .any(|v| !v.is_finite())
    {
        issues.push(CycleIssue::TouchesFilterEdge);
    }

    let period_samples = points.next_trough - points.trough;
    let period_s = period_samples as f32 / fs;

    let rise_amplitude = signal[points.peak] - signal[points.trough];
    let decay_amplitude = signal[points.peak] - signal[points.next_trough];
    if rise_amplitude < 0.0 {
        issues.push(CycleIssue::NegativeRiseAmplitude);
    }
    if decay_amplitude < 0.0 {
        issues.push(CycleIssue::NegativeDecayAmplitude);
    }
    let amplitude = (rise_amplitude + decay_amplitude) / 2.0;

    let time_rdsym = (points.peak - points.trough) as f32 / period_samples as f32;
    let time_ptsym = match (points.rise, points.decay) {
        // Ordering guard above guarantees rise < peak < decay here.
        (Some(rise), Some(decay)) => Some((decay - rise) as f32 / period_samples as f32),
        _ => None,
    };

    if !(0.0..=1.0).contains(&time_rdsym)
        || time_ptsym.is_some_and(|v| !(0.0..=1.0).contains(&v))
    {
        issues.push(CycleIssue::SymmetryOutOfRange);
    }

    issues.dedup();
    if !issues.is_empty() {
        warn!(
            trough = points.trough,
            next_trough = points.next_trough,
            ?issues,
            "cycle flagged with data-quality issues"
        );
    }

    CycleFeatures {
        points,
        period_samples,
        period_s,
        rise_amplitude,
        decay_amplitude,
        amplitude,
        time_rdsym,
        time_ptsym,
        issues,
    }
}

fn well_ordered(points: CyclePoints) -> bool {
    let rise_ok = points
        .rise
        .is_none_or(|r| points.trough < r && r < points.peak);
    let decay_ok = points
        .decay
        .is_none_or(|d| points.peak < d && d < points.next_trough);
    points.trough < points.peak && points.peak < points.next_trough && rise_ok && decay_ok
}
