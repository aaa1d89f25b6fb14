//! Integration tests for the full cycle-by-cycle and dual-threshold
//! pipelines, using synthetic signals with known ground truth.

use std::f32::consts::PI;

use wavecycle_analysis::burst::{BurstConfig, detect_bursts_cycles};
use wavecycle_analysis::cycles::{assemble_cycles, compute_features};
use wavecycle_analysis::dual_threshold::{
    Average, DualThresholdConfig, Magnitude, detect_bursts_dual_threshold,
};
use wavecycle_analysis::extrema::find_extrema;
use wavecycle_analysis::stats::compute_burst_stats;
use wavecycle_core::band::FrequencyBand;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sine wave of the given frequency and amplitude.
fn sine(freq_hz: f32, fs: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / fs).sin())
        .collect()
}

fn alpha_band() -> FrequencyBand {
    FrequencyBand::new(8.0, 12.0).unwrap()
}

/// Thresholds from the reference scenario: amp/period consistency 0.5,
/// monotonicity 0.8, three-cycle floor, band amplitude off.
fn scenario_config() -> BurstConfig {
    BurstConfig::new(0.0, 0.5, 0.5, 0.8, 3).unwrap()
}

// ===========================================================================
// 1. Reference scenario: 10 Hz unit sinusoid at 1 kHz
// ===========================================================================

#[test]
fn sinusoid_recovers_period_and_symmetry() {
    let fs = 1000.0;
    let signal = sine(10.0, fs, 1000, 1.0);

    let extrema = find_extrema(&signal, fs, alpha_band()).unwrap();
    let cycles = assemble_cycles(&signal, &extrema);
    let features = compute_features(&signal, fs, &cycles);

    assert!(
        (7..=10).contains(&features.len()),
        "expected ~8-10 cycles in 1 s of 10 Hz, got {}",
        features.len()
    );

    for f in &features {
        assert!(f.is_clean(), "cycle issues: {:?}", f.issues);
        assert!(
            f.period_samples.abs_diff(100) <= 1,
            "period {} not within 1 sample of fs/f = 100",
            f.period_samples
        );
        assert!(
            (f.amplitude - 2.0).abs() < 0.05,
            "amplitude {} far from peak-to-trough 2.0",
            f.amplitude
        );
        assert!(
            (f.time_rdsym - 0.5).abs() < 0.05,
            "rdsym {} far from 0.5",
            f.time_rdsym
        );
        let ptsym = f.time_ptsym.expect("clean cycle has ptsym");
        assert!((ptsym - 0.5).abs() < 0.05, "ptsym {ptsym} far from 0.5");
    }
}

#[test]
fn sinusoid_interior_cycles_all_burst() {
    let fs = 1000.0;
    let signal = sine(10.0, fs, 1000, 1.0);
    let table = detect_bursts_cycles(&signal, fs, alpha_band(), &scenario_config()).unwrap();

    assert!(table.len() >= 5);
    assert!(!table.first().unwrap().is_burst, "first cycle must not burst");
    assert!(!table.last().unwrap().is_burst, "last cycle must not burst");
    for row in &table[1..table.len() - 1] {
        assert!(
            row.is_burst,
            "interior cycle at trough {} not burst",
            row.features.points.trough
        );
        let s = &row.scores;
        assert!(s.amp_consistency.unwrap() > 0.9);
        assert!(s.period_consistency.unwrap() > 0.9);
        assert!(s.monotonicity.unwrap() > 0.9);
    }
}

// ===========================================================================
// 2. Degenerate inputs
// ===========================================================================

#[test]
fn all_zero_signal_flows_through_without_error() {
    let fs = 1000.0;
    let signal = vec![0.0f32; 2000];

    let extrema = find_extrema(&signal, fs, alpha_band()).unwrap();
    assert!(extrema.peaks.is_empty());
    assert!(extrema.troughs.is_empty());

    let cycles = assemble_cycles(&signal, &extrema);
    assert!(cycles.is_empty());

    let table = detect_bursts_cycles(&signal, fs, alpha_band(), &scenario_config()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn no_burst_stats_are_explicit_not_nan() {
    let stats = compute_burst_stats(&[false; 1000], 1000.0);
    assert_eq!(stats.n_bursts, 0);
    assert!(stats.duration_mean.is_none());
    assert!(stats.duration_max.is_none());
    assert!(stats.duration_min.is_none());
    assert_eq!(stats.percent_burst, 0.0);
}

// ===========================================================================
// 3. Dual-threshold detector scenarios
// ===========================================================================

#[test]
fn constant_amplitude_sinusoid_has_no_dual_threshold_bursts() {
    // Relative magnitude sits at ~1.0 everywhere; thresholds (2, 3) can
    // never be crossed.
    let fs = 1000.0;
    let signal = sine(10.0, fs, 3000, 1.0);
    let config = DualThresholdConfig::new(2.0, 3.0, Average::Mean, Magnitude::Amplitude).unwrap();
    let mask = detect_bursts_dual_threshold(&signal, fs, &config, alpha_band()).unwrap();

    assert_eq!(mask.len(), signal.len());
    assert!(mask.iter().all(|&b| !b));
}

#[test]
fn dual_threshold_finds_amplitude_burst_and_stats_agree() {
    let fs = 1000.0;
    let n = 9000;
    // Quiet alpha with a loud middle third.
    let signal: Vec<f32> = (0..n)
        .map(|i| {
            let amp = if i >= n / 3 && i < 2 * n / 3 { 1.0 } else { 0.1 };
            amp * (2.0 * PI * 10.0 * i as f32 / fs).sin()
        })
        .collect();

    let config = DualThresholdConfig::new(1.0, 2.0, Average::Mean, Magnitude::Amplitude).unwrap();
    let mask = detect_bursts_dual_threshold(&signal, fs, &config, alpha_band()).unwrap();
    let stats = compute_burst_stats(&mask, fs);

    assert!(stats.n_bursts >= 1, "loud third not detected");
    assert!(mask[n / 2], "center of loud third not burst");
    assert!(
        stats.percent_burst > 20.0 && stats.percent_burst < 45.0,
        "expected roughly a third of samples bursting, got {}%",
        stats.percent_burst
    );
    assert!(stats.duration_max.unwrap() > 1.0, "burst should span seconds");
}

// ===========================================================================
// 4. Config surface
// ===========================================================================

#[test]
fn inverted_dual_thresholds_rejected_before_computation() {
    assert!(DualThresholdConfig::new(3.0, 2.0, Average::Mean, Magnitude::Amplitude).is_err());
}

#[test]
fn classifier_thresholds_validated_at_construction() {
    assert!(BurstConfig::new(0.0, 0.5, 1.2, 0.8, 3).is_err());
    assert!(BurstConfig::new(0.0, 0.5, 0.5, 0.8, 0).is_err());
    assert!(BurstConfig::new(0.0, 0.5, 0.5, 0.8, 3).is_ok());
}

#[test]
fn feature_table_round_trips_through_json() {
    let fs = 1000.0;
    let signal = sine(10.0, fs, 2000, 1.0);
    let table = detect_bursts_cycles(&signal, fs, alpha_band(), &scenario_config()).unwrap();

    let json = serde_json::to_string(&table).unwrap();
    let back: Vec<wavecycle_analysis::CycleBurst> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
}
