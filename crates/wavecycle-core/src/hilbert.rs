//! Hilbert transform and amplitude envelope.
//!
//! The analytic signal z(t) = x(t) + i*H{x(t)} is computed with the FFT
//! method: forward transform, zero the negative frequencies, double the
//! positive ones (DC and Nyquist untouched), inverse transform. Its
//! magnitude is the instantaneous amplitude envelope used by the burst
//! detectors.
//!
//! Input is zero-padded to the next power of two for the transform and
//! truncated back, so arbitrary-length signals work without the caller
//! thinking about FFT sizes.
//!
//! # NaN handling
//!
//! Filtered signals carry NaN edge samples. The transform runs on the
//! finite core of the input with NaN spans substituted by zero, and every
//! sample that was NaN going in is NaN coming out, so undefined regions
//! never acquire fabricated envelope values.

use rustfft::num_complex::Complex;

use crate::fft::{Fft, next_power_of_two};

/// Analytic signal of the finite part of `signal`, zero-padded to a power
/// of two and truncated to the input length.
pub fn analytic_signal(signal: &[f32]) -> Vec<Complex<f32>> {
    if signal.is_empty() {
        return Vec::new();
    }

    let fft_size = next_power_of_two(signal.len());
    let fft = Fft::new(fft_size);

    let mut buffer: Vec<Complex<f32>> = signal
        .iter()
        .map(|&x| Complex::new(if x.is_finite() { x } else { 0.0 }, 0.0))
        .collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    fft.forward_complex(&mut buffer);

    // DC (bin 0) and Nyquist (bin N/2) unchanged, positive frequencies
    // doubled, negative frequencies zeroed.
    let half = fft_size / 2;
    for sample in buffer.iter_mut().take(half).skip(1) {
        *sample *= 2.0;
    }
    for sample in buffer.iter_mut().skip(half + 1) {
        *sample = Complex::new(0.0, 0.0);
    }

    fft.inverse_complex(&mut buffer);
    buffer.truncate(signal.len());
    buffer
}

/// Instantaneous amplitude (envelope) of a signal.
///
/// Output is the same length as the input; input NaN samples are restored
/// as NaN in the output.
pub fn amplitude_envelope(signal: &[f32]) -> Vec<f32> {
    analytic_signal(signal)
        .iter()
        .zip(signal)
        .map(|(c, &x)| if x.is_finite() { c.norm() } else { f32::NAN })
        .collect()
}
