//! Statistical helper functions for hydrofill.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Number of finite entries in `data`.
pub fn count_finite(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_finite()).count()
}

/// Per-bin arithmetic mean.
///
/// Returns a vector of length `max(bins) + 1` whose entry `k` is the mean of
/// every `values[i]` with `bins[i] == k`. Bins without members are NaN.
/// Empty input gives an empty vector.
///
/// # Panics
///
/// Panics if `bins` and `values` differ in length, or if any value is not
/// finite. Both are caller bugs.
pub fn bin_mean(bins: &[usize], values: &[f64]) -> Vec<f64> {
    assert_eq!(
        bins.len(),
        values.len(),
        "bin_mean: bins and values must have equal length"
    );
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        panic!("bin_mean: values must be finite, got {} at index {i}", values[i]);
    }

    let Some(&max_bin) = bins.iter().max() else {
        return Vec::new();
    };

    let mut sums = vec![0.0; max_bin + 1];
    let mut counts = vec![0usize; max_bin + 1];
    for (&b, &v) in bins.iter().zip(values) {
        sums[b] += v;
        counts[b] += 1;
    }

    sums.iter()
        .zip(&counts)
        .map(|(&s, &c)| if c == 0 { f64::NAN } else { s / c as f64 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_count_finite() {
        assert_eq!(count_finite(&[1.0, f64::NAN, -2.0, f64::NEG_INFINITY]), 2);
    }

    #[test]
    fn test_bin_mean_basic() {
        let result = bin_mean(&[0, 0, 1], &[2.0, 4.0, 10.0]);
        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(result[1], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bin_mean_empty_bin_is_nan() {
        let result = bin_mean(&[0, 2, 2], &[1.0, 5.0, 7.0]);
        assert_eq!(result.len(), 3);
        assert_relative_eq!(result[0], 1.0, epsilon = 1e-12);
        assert!(result[1].is_nan());
        assert_relative_eq!(result[2], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bin_mean_unordered_bins() {
        let result = bin_mean(&[3, 1, 3, 1], &[1.0, 2.0, 3.0, 4.0]);
        assert!(result[0].is_nan());
        assert_relative_eq!(result[1], 3.0, epsilon = 1e-12);
        assert!(result[2].is_nan());
        assert_relative_eq!(result[3], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bin_mean_empty_input() {
        assert!(bin_mean(&[], &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "bin_mean: bins and values must have equal length")]
    fn test_bin_mean_length_mismatch_panics() {
        bin_mean(&[0, 1], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "bin_mean: values must be finite")]
    fn test_bin_mean_nan_value_panics() {
        bin_mean(&[0, 1], &[1.0, f64::NAN]);
    }
}
