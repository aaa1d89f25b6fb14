//! Error types for signal-level operations.

use crate::band::BandError;
use thiserror::Error;

/// Errors that can occur in the signal-primitive layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// The requested frequency band is malformed for this operation.
    #[error(transparent)]
    Band(#[from] BandError),

    /// The input signal contains no samples.
    #[error("input signal is empty")]
    EmptySignal,

    /// The sampling rate must be a finite positive number.
    #[error("invalid sampling rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// The FIR kernel does not fit inside the signal.
    #[error("filter kernel ({kernel} taps) is longer than the signal ({signal} samples)")]
    KernelTooLong {
        /// Kernel length in taps.
        kernel: usize,
        /// Signal length in samples.
        signal: usize,
    },

    /// The requested filter length is not usable.
    #[error("filter length {0} seconds does not yield at least 3 taps")]
    FilterTooShort(f32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::FrequencyBand;

    #[test]
    fn band_error_converts() {
        let band_err = FrequencyBand::new(-1.0, 5.0).unwrap_err();
        let err: CoreError = band_err.into();
        assert!(matches!(err, CoreError::Band(_)));
    }

    #[test]
    fn kernel_too_long_display() {
        let err = CoreError::KernelTooLong {
            kernel: 501,
            signal: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("501"), "got: {msg}");
        assert!(msg.contains("100"), "got: {msg}");
    }
}
