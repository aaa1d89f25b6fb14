//! Windowed-sinc FIR filtering.
//!
//! Bandpass and lowpass primitives for isolating the oscillation band
//! before extrema localization and envelope computation. The kernels are
//! symmetric, so "same"-length convolution is zero-phase: peaks and zero
//! crossings of the filtered signal stay aligned with the raw signal,
//! which the cycle segmentation depends on.
//!
//! # Edge samples
//!
//! The first and last half-kernel of output samples are contaminated by
//! the implicit zero padding. With `remove_edges = true` they are set to
//! NaN so downstream stages can exclude anything touching them; with
//! `remove_edges = false` they are returned as-is (useful when only the
//! zero crossings of the filtered signal matter).
//!
//! # Example
//!
//! ```rust
//! use wavecycle_core::band::FrequencyBand;
//! use wavecycle_core::filter::filter_bandpass;
//! use std::f32::consts::PI;
//!
//! let fs = 500.0;
//! let signal: Vec<f32> = (0..2000)
//!     .map(|i| (2.0 * PI * 10.0 * i as f32 / fs).sin())
//!     .collect();
//! let band = FrequencyBand::new(8.0, 12.0).unwrap();
//!
//! let filtered = filter_bandpass(&signal, fs, band, None, true).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! assert!(filtered[0].is_nan()); // edge sample removed
//! ```

use std::f32::consts::PI;

use tracing::debug;

use crate::band::FrequencyBand;
use crate::error::CoreError;

/// Number of low-cutoff cycles spanned by the default bandpass kernel.
const DEFAULT_BANDPASS_CYCLES: f32 = 3.0;

/// Band-pass filter a signal with a Hamming-windowed sinc kernel.
///
/// # Arguments
///
/// * `signal` - Input samples
/// * `fs` - Sampling rate in Hz
/// * `band` - Pass band; checked against Nyquist here
/// * `n_seconds` - Kernel duration in seconds; `None` uses 3 cycles of the
///   band's lower cutoff
/// * `remove_edges` - Replace the half-kernel of samples at each end of
///   the output with NaN
///
/// # Errors
///
/// Rejects empty signals, non-finite or non-positive sampling rates,
/// bands at or above Nyquist, and kernels that do not fit the signal.
pub fn filter_bandpass(
    signal: &[f32],
    fs: f32,
    band: FrequencyBand,
    n_seconds: Option<f32>,
    remove_edges: bool,
) -> Result<Vec<f32>, CoreError> {
    validate_input(signal, fs)?;
    band.check_nyquist(fs)?;

    let n_seconds = n_seconds.unwrap_or(DEFAULT_BANDPASS_CYCLES / band.low_hz());
    let n_taps = kernel_length(n_seconds, fs)?;
    if n_taps > signal.len() {
        return Err(CoreError::KernelTooLong {
            kernel: n_taps,
            signal: signal.len(),
        });
    }

    let mut kernel = bandpass_kernel(fs, band, n_taps);
    remove_dc(&mut kernel);
    debug!(n_taps, low_hz = band.low_hz(), high_hz = band.high_hz(), "bandpass kernel built");

    let mut out = convolve_same(signal, &kernel);
    if remove_edges {
        nan_edges(&mut out, n_taps / 2);
    }
    Ok(out)
}

/// Low-pass filter a signal with a Hamming-windowed sinc kernel.
///
/// Same contract as [`filter_bandpass`], with a single cutoff. `None` for
/// `n_seconds` uses 3 cycles of the cutoff frequency.
pub fn filter_lowpass(
    signal: &[f32],
    fs: f32,
    cutoff_hz: f32,
    n_seconds: Option<f32>,
    remove_edges: bool,
) -> Result<Vec<f32>, CoreError> {
    validate_input(signal, fs)?;
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
        return Err(CoreError::Band(crate::band::BandError::NonPositiveLow(
            cutoff_hz,
        )));
    }
    if cutoff_hz >= fs / 2.0 {
        return Err(CoreError::Band(crate::band::BandError::AboveNyquist {
            high: cutoff_hz,
            nyquist: fs / 2.0,
        }));
    }

    let n_seconds = n_seconds.unwrap_or(DEFAULT_BANDPASS_CYCLES / cutoff_hz);
    let n_taps = kernel_length(n_seconds, fs)?;
    if n_taps > signal.len() {
        return Err(CoreError::KernelTooLong {
            kernel: n_taps,
            signal: signal.len(),
        });
    }

    let kernel = lowpass_kernel(fs, cutoff_hz, n_taps);
    debug!(n_taps, cutoff_hz, "lowpass kernel built");

    let mut out = convolve_same(signal, &kernel);
    if remove_edges {
        nan_edges(&mut out, n_taps / 2);
    }
    Ok(out)
}

fn validate_input(signal: &[f32], fs: f32) -> Result<(), CoreError> {
    if signal.is_empty() {
        return Err(CoreError::EmptySignal);
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(CoreError::InvalidSampleRate(fs));
    }
    Ok(())
}

/// Round a duration to an odd tap count so the kernel has a center tap.
fn kernel_length(n_seconds: f32, fs: f32) -> Result<usize, CoreError> {
    if !n_seconds.is_finite() || n_seconds <= 0.0 {
        return Err(CoreError::FilterTooShort(n_seconds));
    }
    let mut n_taps = (n_seconds * fs).round() as usize;
    if n_taps % 2 == 0 {
        n_taps += 1;
    }
    if n_taps < 3 {
        return Err(CoreError::FilterTooShort(n_seconds));
    }
    Ok(n_taps)
}

/// Normalized sinc, sin(pi x) / (pi x).
fn sinc(x: f32) -> f32 {
    if x.abs() < 1e-7 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Hamming window coefficient for tap `i` of `n` taps.
fn hamming(i: usize, n: usize) -> f32 {
    0.54 - 0.46 * (2.0 * PI * i as f32 / (n - 1) as f32).cos()
}

/// Windowed-sinc lowpass kernel with unity DC gain.
fn lowpass_kernel(fs: f32, cutoff_hz: f32, n_taps: usize) -> Vec<f32> {
    let center = (n_taps / 2) as f32;
    let fc = cutoff_hz / fs;
    let mut kernel: Vec<f32> = (0..n_taps)
        .map(|i| 2.0 * fc * sinc(2.0 * fc * (i as f32 - center)) * hamming(i, n_taps))
        .collect();
    let sum: f32 = kernel.iter().sum();
    for tap in &mut kernel {
        *tap /= sum;
    }
    kernel
}

/// Bandpass kernel as the difference of two unity-DC lowpass kernels.
fn bandpass_kernel(fs: f32, band: FrequencyBand, n_taps: usize) -> Vec<f32> {
    let high = lowpass_kernel(fs, band.high_hz(), n_taps);
    let low = lowpass_kernel(fs, band.low_hz(), n_taps);
    high.iter().zip(&low).map(|(h, l)| h - l).collect()
}

/// Force exactly zero DC gain. The lowpass difference already comes close;
/// residual DC would bias the zero crossings the segmentation anchors on.
fn remove_dc(kernel: &mut [f32]) {
    let mean = kernel.iter().sum::<f32>() / kernel.len() as f32;
    for tap in kernel.iter_mut() {
        *tap -= mean;
    }
}

/// "Same"-length convolution with the kernel centered on each sample.
/// Out-of-range input is treated as zero.
fn convolve_same(signal: &[f32], kernel: &[f32]) -> Vec<f32> {
    let half = kernel.len() / 2;
    let n = signal.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut acc = 0.0f32;
        for (k, &tap) in kernel.iter().enumerate() {
            let j = i as isize + k as isize - half as isize;
            if j >= 0 && (j as usize) < n {
                acc += tap * signal[j as usize];
            }
        }
        out.push(acc);
    }
    out
}

fn nan_edges(out: &mut [f32], half: usize) {
    let n = out.len();
    let half = half.min(n);
    for v in &mut out[..half] {
        *v = f32::NAN;
    }
    for v in &mut out[n - half..] {
        *v = f32::NAN;
    }
}
