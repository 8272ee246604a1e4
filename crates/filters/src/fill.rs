//! Filling invalid samples from their valid neighbours.

use crate::error::FilterError;

/// Produces a fully dense signal from one with missing samples.
pub trait FillInvalid: Send + Sync {
    /// Returns a copy of `signal` in which every non-finite sample has been
    /// replaced. Valid samples are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NoValidData`] if there is nothing to fill from.
    fn fill_invalid(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError>;
}

/// Linear interpolation between the nearest valid neighbours, holding the
/// first and last valid values constant beyond the ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearFill;

impl FillInvalid for LinearFill {
    fn fill_invalid(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }

        let valid: Vec<usize> = (0..signal.len())
            .filter(|&i| signal[i].is_finite())
            .collect();
        let (Some(&first), Some(&last)) = (valid.first(), valid.last()) else {
            return Err(FilterError::NoValidData { len: signal.len() });
        };

        let mut out = signal.to_vec();
        for v in &mut out[..first] {
            *v = signal[first];
        }
        for v in &mut out[last + 1..] {
            *v = signal[last];
        }
        for pair in valid.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b - a < 2 {
                continue;
            }
            let (ya, yb) = (signal[a], signal[b]);
            let span = (b - a) as f64;
            for (i, v) in out.iter_mut().enumerate().take(b).skip(a + 1) {
                let t = (i - a) as f64 / span;
                *v = ya + t * (yb - ya);
            }
        }
        Ok(out)
    }
}
