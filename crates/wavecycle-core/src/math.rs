//! NaN-aware statistics and deterministic extremum search.
//!
//! Filtered signals in this workspace use NaN to mark undefined edge
//! samples, so the plain slice statistics here come in both strict and
//! NaN-skipping flavors. Extremum search returns the first occurrence on
//! ties, which keeps flat or degenerate spans deterministic.

/// Arithmetic mean of a slice. Returns `None` for an empty slice.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Median of a slice. Returns `None` for an empty slice.
///
/// Uses the upper median for even-length input (index `len / 2` after
/// sorting), matching the crossing-index tie-break used by the zero-cross
/// finder.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(sorted[sorted.len() / 2])
}

/// Mean over the finite samples of a slice. Returns `None` if no sample
/// is finite.
pub fn nanmean(values: &[f32]) -> Option<f32> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 { None } else { Some(sum / count as f32) }
}

/// Median over the finite samples of a slice. Returns `None` if no sample
/// is finite.
pub fn nanmedian(values: &[f32]) -> Option<f32> {
    let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    median(&finite)
}

/// Index of the maximum value, first occurrence on ties.
///
/// NaN samples never win; returns `None` for empty input or all-NaN input.
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the minimum value, first occurrence on ties.
///
/// NaN samples never win; returns `None` for empty input or all-NaN input.
pub fn argmin_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Ratio of the smaller to the larger of two non-negative values, in [0, 1].
///
/// Returns `None` when either value is non-finite or the larger is zero.
pub fn bounded_ratio(a: f32, b: f32) -> Option<f32> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi <= 0.0 {
        return None;
    }
    Some((lo / hi).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_simple_slice() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        // Upper median for even length.
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(3.0));
    }

    #[test]
    fn nanmean_skips_nan() {
        let v = [f32::NAN, 2.0, 4.0, f32::NAN];
        assert_eq!(nanmean(&v), Some(3.0));
        assert_eq!(nanmean(&[f32::NAN]), None);
    }

    #[test]
    fn nanmedian_skips_nan() {
        let v = [f32::NAN, 5.0, 1.0, 3.0];
        assert_eq!(nanmedian(&v), Some(3.0));
    }

    #[test]
    fn argmax_first_occurrence_on_flat() {
        let v = [1.0, 1.0, 1.0];
        assert_eq!(argmax_first(&v), Some(0));
        assert_eq!(argmin_first(&v), Some(0));
    }

    #[test]
    fn argmax_ignores_nan() {
        let v = [f32::NAN, 2.0, 5.0, f32::NAN, 3.0];
        assert_eq!(argmax_first(&v), Some(2));
        assert_eq!(argmin_first(&v), Some(1));
    }

    #[test]
    fn argmax_all_nan_is_none() {
        assert_eq!(argmax_first(&[f32::NAN, f32::NAN]), None);
        assert_eq!(argmax_first(&[]), None);
    }

    #[test]
    fn bounded_ratio_symmetric() {
        assert_eq!(bounded_ratio(2.0, 4.0), Some(0.5));
        assert_eq!(bounded_ratio(4.0, 2.0), Some(0.5));
        assert_eq!(bounded_ratio(3.0, 3.0), Some(1.0));
    }

    #[test]
    fn bounded_ratio_degenerate() {
        assert_eq!(bounded_ratio(0.0, 0.0), None);
        assert_eq!(bounded_ratio(f32::NAN, 1.0), None);
    }
}
