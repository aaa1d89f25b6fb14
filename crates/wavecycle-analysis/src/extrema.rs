//! Extrema localization anchored on narrowband zero crossings.
//!
//! Peaks and troughs of a noisy oscillation are unstable to find directly,
//! so the localizer first band-pass filters the signal to the oscillation
//! band and uses that narrowband signal's zero crossings as anchors: each
//! pair of consecutive rising crossings brackets exactly one peak, each
//! pair of falling crossings exactly one trough. Inside each bracket the
//! extremum index is taken from the *raw* signal, so reported sample
//! indices point at real waveform features, not filtered ones.
//!
//! # Example
//!
//! ```rust
//! use wavecycle_analysis::extrema::find_extrema;
//! use wavecycle_core::band::FrequencyBand;
//! use std::f32::consts::PI;
//!
//! let fs = 1000.0;
//! let signal: Vec<f32> = (0..2000)
//!     .map(|i| (2.0 * PI * 10.0 * i as f32 / fs).sin())
//!     .collect();
//! let band = FrequencyBand::new(8.0, 12.0).unwrap();
//!
//! let extrema = find_extrema(&signal, fs, band).unwrap();
//! assert!(!extrema.peaks.is_empty());
//! assert!(extrema.peaks.len().abs_diff(extrema.troughs.len()) <= 1);
//! ```

use tracing::debug;
use wavecycle_core::band::FrequencyBand;
use wavecycle_core::filter::filter_bandpass;
use wavecycle_core::math::{argmax_first, argmin_first};

use crate::error::AnalysisError;
use crate::zerox::{Flank, find_flank_zerox};

/// Peak and trough sample indices, each ordered by time and strictly
/// interleaved with the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extrema {
    /// Sample indices of peaks (local maxima of the raw signal).
    pub peaks: Vec<usize>,
    /// Sample indices of troughs (local minima of the raw signal).
    pub troughs: Vec<usize>,
}

impl Extrema {
    /// True when no extrema were found at all.
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty() && self.troughs.is_empty()
    }
}

/// Localize peaks and troughs of the oscillation described by `band`.
///
/// Fewer than two zero crossings of a flank type yields an empty sequence
/// for the corresponding extrema, not an error: a flat or non-oscillatory
/// signal simply has no cycles. Flat brackets resolve to the first sample
/// of the bracket (first-occurrence argmax/argmin), keeping degenerate
/// input deterministic.
pub fn find_extrema(
    signal: &[f32],
    fs: f32,
    band: FrequencyBand,
) -> Result<Extrema, AnalysisError> {
    // Edges are kept (not NaN'd): only the crossing locations of the
    // filtered signal matter here, and trimming would discard the outer
    // brackets entirely.
    let filtered = filter_bandpass(signal, fs, band, None, false)?;

    let rises = find_flank_zerox(&filtered, Flank::Rise);
    let decays = find_flank_zerox(&filtered, Flank::Decay);

    let peaks = extrema_between(signal, &rises, SearchKind::Max);
    let troughs = extrema_between(signal, &decays, SearchKind::Min);

    if peaks.is_empty() || troughs.is_empty() {
        debug!(
            n_rises = rises.len(),
            n_decays = decays.len(),
            "too few zero crossings to localize extrema"
        );
    }

    Ok(Extrema { peaks, troughs })
}

#[derive(Clone, Copy)]
enum SearchKind {
    Max,
    Min,
}

/// One extremum of the raw signal per bracket of consecutive anchors.
fn extrema_between(signal: &[f32], anchors: &[usize], kind: SearchKind) -> Vec<usize> {
    let mut extrema = Vec::new();
    for pair in anchors.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let span = &signal[start..end];
        let local = match kind {
            SearchKind::Max => argmax_first(span),
            SearchKind::Min => argmin_first(span),
        };
        if let Some(offset) = local {
            extrema.push(start + offset);
        }
    }
    extrema
}
