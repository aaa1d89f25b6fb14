//! Burst-run statistics.
//!
//! Reduces a per-sample boolean burst mask to run-level summary numbers:
//! how many bursts, how long they last, and what fraction of the series
//! is bursting. "No bursts detected" is a first-class outcome: the
//! duration statistics are `None` rather than NaN, so nothing downstream
//! can silently average an undefined value.

use serde::{Deserialize, Serialize};

/// A maximal contiguous run of burst samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstRun {
    /// Index of the first burst sample.
    pub start: usize,
    /// Index one past the last burst sample.
    pub end: usize,
}

impl BurstRun {
    /// Run length in samples.
    pub fn len_samples(&self) -> usize {
        self.end - self.start
    }

    /// Run duration in seconds at the given sampling rate.
    pub fn duration_s(&self, fs: f32) -> f32 {
        self.len_samples() as f32 / fs
    }
}

/// Summary statistics over the burst runs of a mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstStats {
    /// Number of maximal burst runs.
    pub n_bursts: usize,
    /// Mean run duration in seconds; `None` when no bursts were detected.
    pub duration_mean: Option<f32>,
    /// Longest run duration in seconds; `None` when no bursts were detected.
    pub duration_max: Option<f32>,
    /// Shortest run duration in seconds; `None` when no bursts were detected.
    pub duration_min: Option<f32>,
    /// Percentage of samples marked as bursting, in [0, 100].
    pub percent_burst: f32,
}

/// Extract the maximal `true` runs of a mask in one scan.
pub fn burst_runs(mask: &[bool]) -> Vec<BurstRun> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &b) in mask.iter().enumerate() {
        match (b, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(BurstRun { start: s, end: i });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(BurstRun {
            start: s,
            end: mask.len(),
        });
    }
    runs
}

/// Compute run statistics for a burst mask.
///
/// An empty mask or one with no `true` samples reports `n_bursts = 0`
/// and undefined durations.
pub fn compute_burst_stats(mask: &[bool], fs: f32) -> BurstStats {
    let runs = burst_runs(mask);
    let n_bursts = runs.len();

    let percent_burst = if mask.is_empty() {
        0.0
    } else {
        let burst_samples: usize = runs.iter().map(BurstRun::len_samples).sum();
        100.0 * burst_samples as f32 / mask.len() as f32
    };

    if runs.is_empty() {
        return BurstStats {
            n_bursts: 0,
            duration_mean: None,
            duration_max: None,
            duration_min: None,
            percent_burst,
        };
    }

    let durations: Vec<f32> = runs.iter().map(|r| r.duration_s(fs)).collect();
    let sum: f32 = durations.iter().sum();
    let max = durations.iter().copied().fold(f32::MIN, f32::max);
    let min = durations.iter().copied().fold(f32::MAX, f32::min);

    BurstStats {
        n_bursts,
        duration_mean: Some(sum / n_bursts as f32),
        duration_max: Some(max),
        duration_min: Some(min),
        percent_burst,
    }
}
