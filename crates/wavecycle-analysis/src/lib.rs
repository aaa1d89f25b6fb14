//! Wavecycle Analysis - cycle-by-cycle oscillation features and burst detection
//!
//! This crate segments a continuous signal into individual oscillatory
//! cycles and decides, per cycle or per sample, whether a genuine burst of
//! oscillation is present:
//!
//! - [`extrema`] - Peak/trough localization anchored on narrowband zero crossings
//! - [`zerox`] - Flank zero crossings and midpoint localization
//! - [`cycles`] - Cycle assembly and per-cycle features (amplitude, period, symmetry)
//! - [`burst`] - Consistency-score burst classification with a run-length floor
//! - [`dual_threshold`] - Independent envelope hysteresis burst detector
//! - [`stats`] - Burst-run summary statistics
//! - [`batch`] - Rayon driver for many signals with cooperative cancellation
//!
//! The two burst detectors are alternatives, not stages of one pipeline:
//! the consistency classifier works on segmented cycles and asks "does
//! this cycle look like its neighbors", while the dual-threshold detector
//! works on the raw envelope and asks "is the band amplitude high right
//! now". Pick per use case; the batch driver can run both side by side.
//!
//! # Example
//!
//! ```rust
//! use wavecycle_analysis::burst::{BurstConfig, detect_bursts_cycles};
//! use wavecycle_core::band::FrequencyBand;
//! use std::f32::consts::PI;
//!
//! let fs = 1000.0;
//! let signal: Vec<f32> = (0..2000)
//!     .map(|i| (2.0 * PI * 10.0 * i as f32 / fs).sin())
//!     .collect();
//!
//! let band = FrequencyBand::new(8.0, 12.0).unwrap();
//! let table = detect_bursts_cycles(&signal, fs, band, &BurstConfig::default()).unwrap();
//!
//! // One row per cycle, interior cycles of a clean tone all burst.
//! assert!(table.iter().any(|row| row.is_burst));
//! ```

pub mod batch;
pub mod burst;
pub mod cycles;
pub mod dual_threshold;
pub mod error;
pub mod extrema;
pub mod stats;
pub mod zerox;

pub use batch::{SignalReport, run_batch};
pub use burst::{BurstConfig, ConsistencyScores, CycleBurst, detect_bursts_cycles};
pub use cycles::{CycleFeatures, CycleIssue, CyclePoints};
pub use dual_threshold::{
    Average, DualThresholdConfig, Magnitude, detect_bursts_dual_threshold,
};
pub use error::AnalysisError;
pub use extrema::{Extrema, find_extrema};
pub use stats::{BurstRun, BurstStats, compute_burst_stats};
