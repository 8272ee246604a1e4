//! Window coefficients.

use std::f64::consts::PI;

/// Symmetric Hanning window of length `m`.
///
/// `w[n] = 0.5 - 0.5 cos(2 pi n / (m - 1))`, so both endpoints are zero and
/// the peak (1.0) sits at the centre. A window of length 1 is `[1.0]`; length
/// 0 gives an empty vector.
pub fn hanning(m: usize) -> Vec<f64> {
    match m {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (m - 1) as f64;
            (0..m)
                .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f64 / denom).cos())
                .collect()
        }
    }
}
