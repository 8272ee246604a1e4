//! Missing-data tolerant low-pass filtering.

use tracing::trace;

use crate::error::FilterError;
use crate::window::hanning;

/// Smallest window accepted by [`HanningLowPass`]; a Hanning window of
/// length 2 has zero total weight.
const MIN_WINDOW: usize = 3;

/// A low-pass filter over a dense daily signal with missing samples.
pub trait LowPass: Send + Sync {
    /// Smooths `signal` with a window of `window_days` samples.
    ///
    /// Output has the same length as `signal`. An output position is NaN
    /// when the share of window weight carried by valid input samples falls
    /// below `nan_weight_threshold`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if the window or threshold is unusable.
    fn lowpass(
        &self,
        signal: &[f64],
        window_days: usize,
        nan_weight_threshold: f64,
    ) -> Result<Vec<f64>, FilterError>;
}

/// Hanning-window FIR low-pass.
///
/// Each output is the Hanning-weighted mean of the valid samples under the
/// window centred on it. The signal is zero-padded past both ends, so the
/// valid-weight share shrinks toward the edges exactly as it does across
/// interior gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct HanningLowPass;

impl LowPass for HanningLowPass {
    fn lowpass(
        &self,
        signal: &[f64],
        window_days: usize,
        nan_weight_threshold: f64,
    ) -> Result<Vec<f64>, FilterError> {
        if window_days < MIN_WINDOW {
            return Err(FilterError::InvalidWindow {
                window: window_days,
                min: MIN_WINDOW,
            });
        }
        if !(0.0..=1.0).contains(&nan_weight_threshold) {
            return Err(FilterError::InvalidThreshold {
                value: nan_weight_threshold,
            });
        }

        let win = hanning(window_days);
        let total: f64 = win.iter().sum();
        let half = (window_days - 1) / 2;
        let n = signal.len();

        let mut out = Vec::with_capacity(n);
        let mut n_rejected = 0usize;
        for i in 0..n {
            // Taps k map to samples j = i + k - half; clip to the signal.
            let k_lo = half.saturating_sub(i);
            let k_hi = (n - 1 + half - i).min(window_days - 1);

            let mut acc = 0.0;
            let mut weight = 0.0;
            for (k, &w) in win.iter().enumerate().take(k_hi + 1).skip(k_lo) {
                let x = signal[i + k - half];
                if x.is_finite() {
                    acc += w * x;
                    weight += w;
                }
            }

            if weight > 0.0 && weight / total >= nan_weight_threshold {
                out.push(acc / weight);
            } else {
                n_rejected += 1;
                out.push(f64::NAN);
            }
        }

        trace!(n, window_days, n_rejected, "hanning low-pass applied");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_signal_passes_through() {
        let signal = vec![4.0; 50];
        let out = HanningLowPass.lowpass(&signal, 11, 0.01).unwrap();
        assert_eq!(out.len(), 50);
        for v in out {
            assert_abs_diff_eq!(v, 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn linear_signal_preserved_in_interior() {
        let signal: Vec<f64> = (0..40).map(|i| 2.0 * i as f64 + 1.0).collect();
        let out = HanningLowPass.lowpass(&signal, 9, 0.0).unwrap();
        for i in 4..36 {
            assert_abs_diff_eq!(out[i], signal[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn missing_samples_are_ignored() {
        let mut signal = vec![2.5; 30];
        signal[10] = f64::NAN;
        signal[11] = f64::NAN;
        let out = HanningLowPass.lowpass(&signal, 7, 0.1).unwrap();
        for v in out {
            assert_abs_diff_eq!(v, 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn long_gap_rejected_by_threshold() {
        let mut signal = vec![1.0; 60];
        for v in &mut signal[20..40] {
            *v = f64::NAN;
        }
        let out = HanningLowPass.lowpass(&signal, 9, 0.5).unwrap();
        assert!(out[30].is_nan());
        assert!(out[5].is_finite());
        assert!(out[55].is_finite());
    }

    #[test]
    fn all_missing_stays_missing_even_at_zero_threshold() {
        let signal = vec![f64::NAN; 12];
        let out = HanningLowPass.lowpass(&signal, 5, 0.0).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rejects_short_window() {
        let err = HanningLowPass.lowpass(&[1.0, 2.0], 2, 0.1).unwrap_err();
        assert_eq!(err, FilterError::InvalidWindow { window: 2, min: 3 });
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let err = HanningLowPass.lowpass(&[1.0], 3, -0.1).unwrap_err();
        assert!(matches!(err, FilterError::InvalidThreshold { .. }));
    }

    #[test]
    fn window_longer_than_signal() {
        let signal = [1.0, 2.0, 3.0];
        let out = HanningLowPass.lowpass(&signal, 101, 0.0).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_signal() {
        let out = HanningLowPass.lowpass(&[], 5, 0.1).unwrap();
        assert!(out.is_empty());
    }
}
