//! FFT wrapper with cached plans.
//!
//! Thin layer over `rustfft` holding a forward and inverse plan for one
//! size. The Hilbert envelope is the only in-workspace consumer, so the
//! surface is deliberately small: in-place complex transforms plus the
//! padding helper it needs.

use rustfft::num_complex::Complex;
use rustfft::{Fft as RustFft, FftPlanner};
use std::sync::Arc;

/// FFT processor for a fixed size.
pub struct Fft {
    fft: Arc<dyn RustFft<f32>>,
    ifft: Arc<dyn RustFft<f32>>,
    size: usize,
}

impl Fft {
    /// Create plans for the given size. Powers of two are fastest.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);
        Self { fft, ifft, size }
    }

    /// FFT size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward FFT, in place.
    pub fn forward_complex(&self, buffer: &mut [Complex<f32>]) {
        self.fft.process(buffer);
    }

    /// Inverse FFT, in place, normalized by 1/N.
    pub fn inverse_complex(&self, buffer: &mut [Complex<f32>]) {
        self.ifft.process(buffer);
        let scale = 1.0 / self.size as f32;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}

/// Smallest power of two that holds `n` samples.
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}
