//! Frequency band specification.
//!
//! A [`FrequencyBand`] names the oscillation of interest, e.g. alpha
//! (8-13 Hz) in an EEG recording. Bounds are validated at construction so
//! that filter code never has to re-check them at the point of use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a frequency band is malformed.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BandError {
    /// Lower cutoff must be strictly positive.
    #[error("lower cutoff {0} Hz must be > 0")]
    NonPositiveLow(f32),

    /// Lower cutoff must lie strictly below the upper cutoff.
    #[error("band is inverted or empty: low {low} Hz, high {high} Hz")]
    Inverted {
        /// Lower cutoff in Hz.
        low: f32,
        /// Upper cutoff in Hz.
        high: f32,
    },

    /// Upper cutoff must lie strictly below the Nyquist frequency.
    #[error("upper cutoff {high} Hz is not below Nyquist ({nyquist} Hz)")]
    AboveNyquist {
        /// Upper cutoff in Hz.
        high: f32,
        /// Nyquist frequency (fs / 2) in Hz.
        nyquist: f32,
    },

    /// Cutoffs must be finite numbers.
    #[error("band cutoffs must be finite: low {low} Hz, high {high} Hz")]
    NonFinite {
        /// Lower cutoff in Hz.
        low: f32,
        /// Upper cutoff in Hz.
        high: f32,
    },
}

/// A validated frequency band `(low_hz, high_hz)` with `0 < low < high`.
///
/// The Nyquist constraint depends on the sampling rate, which is not known
/// at construction; callers that have a sampling rate in hand check it with
/// [`FrequencyBand::check_nyquist`] (filter entry points do this for you).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    low_hz: f32,
    high_hz: f32,
}

impl FrequencyBand {
    /// Create a new band, validating `0 < low_hz < high_hz`.
    pub fn new(low_hz: f32, high_hz: f32) -> Result<Self, BandError> {
        if !low_hz.is_finite() || !high_hz.is_finite() {
            return Err(BandError::NonFinite {
                low: low_hz,
                high: high_hz,
            });
        }
        if low_hz <= 0.0 {
            return Err(BandError::NonPositiveLow(low_hz));
        }
        if low_hz >= high_hz {
            return Err(BandError::Inverted {
                low: low_hz,
                high: high_hz,
            });
        }
        Ok(Self { low_hz, high_hz })
    }

    /// Lower cutoff in Hz.
    pub fn low_hz(&self) -> f32 {
        self.low_hz
    }

    /// Upper cutoff in Hz.
    pub fn high_hz(&self) -> f32 {
        self.high_hz
    }

    /// Geometric center frequency of the band in Hz.
    pub fn center_hz(&self) -> f32 {
        (self.low_hz * self.high_hz).sqrt()
    }

    /// Bandwidth in Hz.
    pub fn bandwidth(&self) -> f32 {
        self.high_hz - self.low_hz
    }

    /// Verify the band sits below Nyquist for the given sampling rate.
    pub fn check_nyquist(&self, fs: f32) -> Result<(), BandError> {
        let nyquist = fs / 2.0;
        if self.high_hz >= nyquist {
            return Err(BandError::AboveNyquist {
                high: self.high_hz,
                nyquist,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_band_accepted() {
        let band = FrequencyBand::new(8.0, 13.0).unwrap();
        assert_eq!(band.low_hz(), 8.0);
        assert_eq!(band.high_hz(), 13.0);
        assert_eq!(band.bandwidth(), 5.0);
    }

    #[test]
    fn center_is_geometric_mean() {
        let band = FrequencyBand::new(4.0, 16.0).unwrap();
        assert!((band.center_hz() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn zero_low_rejected() {
        assert!(matches!(
            FrequencyBand::new(0.0, 10.0),
            Err(BandError::NonPositiveLow(_))
        ));
    }

    #[test]
    fn inverted_band_rejected() {
        assert!(matches!(
            FrequencyBand::new(13.0, 8.0),
            Err(BandError::Inverted { .. })
        ));
    }

    #[test]
    fn equal_cutoffs_rejected() {
        assert!(matches!(
            FrequencyBand::new(10.0, 10.0),
            Err(BandError::Inverted { .. })
        ));
    }

    #[test]
    fn nan_cutoff_rejected() {
        assert!(matches!(
            FrequencyBand::new(f32::NAN, 10.0),
            Err(BandError::NonFinite { .. })
        ));
    }

    #[test]
    fn nyquist_check() {
        let band = FrequencyBand::new(8.0, 13.0).unwrap();
        assert!(band.check_nyquist(1000.0).is_ok());
        assert!(matches!(
            band.check_nyquist(25.0),
            Err(BandError::AboveNyquist { .. })
        ));
    }

    #[test]
    fn error_display_names_offending_values() {
        let err = FrequencyBand::new(13.0, 8.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("13"), "got: {msg}");
        assert!(msg.contains("8"), "got: {msg}");
    }
}
