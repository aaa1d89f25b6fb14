//! Zero-crossing and flank-midpoint localization.
//!
//! Two jobs live here. [`find_flank_zerox`] finds plain sign-change
//! crossings of a (band-filtered) signal; the extrema localizer anchors
//! its search windows on them. [`find_zerox`] finds the rise and decay
//! flank midpoints of already-localized extrema: for each trough-to-peak
//! and peak-to-trough span, the sample where the signal crosses the
//! average of the two extrema voltages.
//!
//! When a flank crosses its midpoint several times (sharp, noisy flanks),
//! the *median* crossing index is reported. This tie-break is load-bearing
//! for burst-detection robustness downstream; do not swap it for first or
//! last.

/// Direction of a flank or zero crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flank {
    /// Negative-to-positive crossing (trough side to peak side).
    Rise,
    /// Positive-to-negative crossing (peak side to trough side).
    Decay,
}

/// Find all zero crossings of `signal` in the given direction.
///
/// Returns the index of the last sample before each crossing. The scan is
/// a plain sample-to-sample sign comparison, no interpolation, so results
/// are deterministic. NaN samples never participate in a crossing.
pub fn find_flank_zerox(signal: &[f32], flank: Flank) -> Vec<usize> {
    let mut crossings = Vec::new();
    for i in 0..signal.len().saturating_sub(1) {
        let (a, b) = (signal[i], signal[i + 1]);
        let crossed = match flank {
            Flank::Rise => a <= 0.0 && b > 0.0,
            Flank::Decay => a >= 0.0 && b < 0.0,
        };
        if crossed {
            crossings.push(i);
        }
    }
    crossings
}

/// Find the midpoint crossing of one flank between two extrema.
///
/// The threshold is the average of the voltages at `from` and `to`. All
/// crossings of that threshold inside the span are collected and the
/// median index is returned; `None` when the flank never crosses it
/// (degenerate or flat flank, or undefined samples in the span).
pub fn flank_midpoint(signal: &[f32], from: usize, to: usize, flank: Flank) -> Option<usize> {
    if from >= to || to >= signal.len() {
        return None;
    }
    let threshold = (signal[from] + signal[to]) / 2.0;
    if !threshold.is_finite() {
        return None;
    }

    let mut crossings = Vec::new();
    for i in from..to {
        let (a, b) = (signal[i], signal[i + 1]);
        let crossed = match flank {
            Flank::Rise => a <= threshold && b > threshold,
            Flank::Decay => a >= threshold && b < threshold,
        };
        if crossed {
            crossings.push(i);
        }
    }
    if crossings.is_empty() {
        None
    } else {
        // Median crossing; upper median for even counts.
        Some(crossings[crossings.len() / 2])
    }
}

/// Find rise and decay flank midpoints for a set of extrema.
///
/// For each peak, the rise midpoint is located on the span from the last
/// trough before it, and the decay midpoint on the span to the first
/// trough after it. `troughs` must be sorted ascending. Entries are `None`
/// when the peak lacks the required neighboring trough or the flank never
/// crosses its midpoint; callers flag such cycles for exclusion rather
/// than erroring.
///
/// Both returned vectors are aligned with `peaks`.
pub fn find_zerox(
    signal: &[f32],
    peaks: &[usize],
    troughs: &[usize],
) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let mut rises = Vec::with_capacity(peaks.len());
    let mut decays = Vec::with_capacity(peaks.len());

    for &peak in peaks {
        // Neighboring troughs sit on either side of the partition point.
        let split = troughs.partition_point(|&t| t < peak);
        let before = split.checked_sub(1).map(|i| troughs[i]);
        let after = troughs.get(split).copied().filter(|&t| t > peak);

        rises.push(before.and_then(|t| flank_midpoint(signal, t, peak, Flank::Rise)));
        decays.push(after.and_then(|t| flank_midpoint(signal, peak, t, Flank::Decay)));
    }

    (rises, decays)
}
