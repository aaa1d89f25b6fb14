//! Wavecycle Core - signal primitives for cycle-by-cycle oscillation analysis
//!
//! This crate provides the signal-level building blocks that the analysis
//! layer (`wavecycle-analysis`) composes into cycle segmentation and burst
//! detection:
//!
//! - [`band`] - Validated frequency band specification
//! - [`filter`] - Windowed-sinc FIR bandpass/lowpass filtering
//! - [`fft`] - FFT wrapper with cached plans
//! - [`hilbert`] - Hilbert transform and amplitude envelope
//! - [`math`] - NaN-aware statistics and deterministic argmax/argmin
//!
//! # Edge handling
//!
//! FIR filtering with `remove_edges` marks the half-kernel of samples at
//! each end of the output as NaN rather than returning shortened arrays.
//! Every consumer in this workspace treats NaN as "undefined sample" and
//! excludes whatever touches it; nothing downstream averages NaN into an
//! aggregate.
//!
//! # Example
//!
//! ```rust
//! use wavecycle_core::band::FrequencyBand;
//! use wavecycle_core::filter::filter_bandpass;
//! use std::f32::consts::PI;
//!
//! let fs = 1000.0;
//! let signal: Vec<f32> = (0..1000)
//!     .map(|i| (2.0 * PI * 10.0 * i as f32 / fs).sin())
//!     .collect();
//!
//! let band = FrequencyBand::new(8.0, 12.0).unwrap();
//! let filtered = filter_bandpass(&signal, fs, band, None, false).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! ```

pub mod band;
pub mod error;
pub mod fft;
pub mod filter;
pub mod hilbert;
pub mod math;

pub use band::{BandError, FrequencyBand};
pub use error::CoreError;
pub use filter::{filter_bandpass, filter_lowpass};
pub use hilbert::amplitude_envelope;
