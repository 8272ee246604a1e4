//! Long-gap detection.
//!
//! Anchors are timesteps that are either valid or fall outside the
//! day-of-year window. Between two anchors at least `min_gap_days` apart the
//! central part of the run is marked, leaving a band of `min_gap_days / 2`
//! on each side for interpolation.

use tracing::debug;

use crate::error::GapFillError;

/// Inclusive-exclusive day-of-year window `[start, end)`.
///
/// Bounds are signed so that `[-1, 367)` covers every day of every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoyWindow {
    start: i32,
    end: i32,
}

impl DoyWindow {
    /// Window covering every day of the year.
    pub const FULL_YEAR: DoyWindow = DoyWindow { start: -1, end: 367 };

    /// Creates a window `[start, end)`.
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Lower bound (inclusive).
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// Upper bound (exclusive).
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Returns `true` if `day_of_year` lies within the window.
    pub fn contains(&self, day_of_year: u16) -> bool {
        let d = i32::from(day_of_year);
        self.start <= d && d < self.end
    }

    /// Returns `true` if the window cannot exclude any day of any year.
    pub const fn covers_full_year(&self) -> bool {
        self.start < 0 && self.end > 366
    }
}

impl Default for DoyWindow {
    fn default() -> Self {
        Self::FULL_YEAR
    }
}

/// Parameters for [`mark_gaps`].
#[derive(Debug, Clone, PartialEq)]
pub struct GapSpec {
    min_gap_days: usize,
    window: DoyWindow,
    include_ends: bool,
}

impl GapSpec {
    /// Creates a spec with the full-year window and no end extension.
    pub fn new(min_gap_days: usize) -> Self {
        Self {
            min_gap_days,
            window: DoyWindow::FULL_YEAR,
            include_ends: false,
        }
    }

    /// Sets the day-of-year window.
    pub fn with_window(mut self, window: DoyWindow) -> Self {
        self.window = window;
        self
    }

    /// Enables or disables marking of leading and trailing runs.
    pub fn with_include_ends(mut self, include_ends: bool) -> Self {
        self.include_ends = include_ends;
        self
    }

    /// Minimum anchor distance that counts as a gap.
    pub fn min_gap_days(&self) -> usize {
        self.min_gap_days
    }

    /// Day-of-year window.
    pub fn window(&self) -> DoyWindow {
        self.window
    }

    /// Whether leading and trailing runs are marked.
    pub fn include_ends(&self) -> bool {
        self.include_ends
    }

    /// Validates parameter consistency.
    pub fn validate(&self) -> Result<(), GapFillError> {
        if self.min_gap_days < 2 {
            return Err(GapFillError::InvalidConfig {
                reason: format!(
                    "min_gap_days must be at least 2, got {}",
                    self.min_gap_days
                ),
            });
        }
        if self.window.start >= self.window.end {
            return Err(GapFillError::InvalidConfig {
                reason: format!(
                    "day-of-year window [{}, {}) is empty",
                    self.window.start, self.window.end
                ),
            });
        }
        if self.include_ends && !self.window.covers_full_year() {
            return Err(GapFillError::InvalidConfig {
                reason: format!(
                    "end extension requires a full-year window, got [{}, {})",
                    self.window.start, self.window.end
                ),
            });
        }
        Ok(())
    }
}

/// Marks the interior of every long gap.
///
/// Returns a mask of the same length as the inputs, `true` where the
/// timestep belongs to a long gap.
///
/// # Errors
///
/// Returns [`GapFillError::InvalidConfig`] if `spec` fails validation, or
/// [`GapFillError::LengthMismatch`] if `valid` and `days_of_year` differ in
/// length.
pub fn mark_gaps(
    days_of_year: &[u16],
    valid: &[bool],
    spec: &GapSpec,
) -> Result<Vec<bool>, GapFillError> {
    spec.validate()?;
    if valid.len() != days_of_year.len() {
        return Err(GapFillError::LengthMismatch {
            field: "valid",
            expected: days_of_year.len(),
            got: valid.len(),
        });
    }

    let n = valid.len();
    let half = spec.min_gap_days / 2;
    let anchors: Vec<usize> = (0..n)
        .filter(|&i| valid[i] || !spec.window.contains(days_of_year[i]))
        .collect();

    let mut in_gap = vec![false; n];
    for pair in anchors.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a >= spec.min_gap_days {
            in_gap[a + half..b - half].fill(true);
        }
    }

    if spec.include_ends {
        match (anchors.first(), anchors.last()) {
            (Some(&first), Some(&last)) => {
                in_gap[..first.saturating_sub(half)].fill(true);
                in_gap[(last + half).min(n)..].fill(true);
            }
            _ => in_gap.fill(true),
        }
    }

    debug!(
        n_anchors = anchors.len(),
        n_marked = in_gap.iter().filter(|&&g| g).count(),
        "marked long gaps"
    );
    Ok(in_gap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doy(n: usize) -> Vec<u16> {
        (0..n).map(|i| (i % 365 + 1) as u16).collect()
    }

    #[test]
    fn window_contains_bounds() {
        let w = DoyWindow::new(100, 200);
        assert!(!w.contains(99));
        assert!(w.contains(100));
        assert!(w.contains(199));
        assert!(!w.contains(200));
    }

    #[test]
    fn full_year_covers_leap_day() {
        assert!(DoyWindow::FULL_YEAR.contains(1));
        assert!(DoyWindow::FULL_YEAR.contains(366));
        assert!(DoyWindow::FULL_YEAR.covers_full_year());
        assert!(!DoyWindow::new(0, 366).covers_full_year());
    }

    #[test]
    fn min_gap_below_two_is_rejected() {
        let spec = GapSpec::new(1);
        assert!(matches!(
            spec.validate(),
            Err(GapFillError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn empty_window_is_rejected() {
        let spec = GapSpec::new(10).with_window(DoyWindow::new(200, 100));
        assert!(spec.validate().is_err());
    }

    #[test]
    fn ends_with_partial_window_is_rejected() {
        let spec = GapSpec::new(10)
            .with_window(DoyWindow::new(90, 300))
            .with_include_ends(true);
        let err = mark_gaps(&doy(10), &[true; 10], &spec).unwrap_err();
        assert!(err.to_string().contains("full-year window"));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = mark_gaps(&doy(10), &[true; 9], &GapSpec::new(4)).unwrap_err();
        assert_eq!(
            err,
            GapFillError::LengthMismatch {
                field: "valid",
                expected: 10,
                got: 9
            }
        );
    }

    #[test]
    fn empty_input() {
        let gaps = mark_gaps(&[], &[], &GapSpec::new(4).with_include_ends(true)).unwrap();
        assert!(gaps.is_empty());
    }

    #[test]
    fn no_anchors_marks_everything_with_ends() {
        let spec = GapSpec::new(4).with_include_ends(true);
        let gaps = mark_gaps(&doy(20), &[false; 20], &spec).unwrap();
        assert!(gaps.iter().all(|&g| g));
    }

    #[test]
    fn no_anchors_marks_nothing_without_ends() {
        let gaps = mark_gaps(&doy(20), &[false; 20], &GapSpec::new(4)).unwrap();
        assert!(gaps.iter().all(|&g| !g));
    }

    #[test]
    fn out_of_window_days_act_as_anchors() {
        // Days 1..=40 missing, but only days 11..=30 lie in the window.
        let mut valid = vec![true; 60];
        valid[..40].iter_mut().for_each(|v| *v = false);
        let spec = GapSpec::new(10).with_window(DoyWindow::new(11, 31));
        let gaps = mark_gaps(&doy(60), &valid, &spec).unwrap();
        // Anchors at indices 9 (doy 10) and 30 (doy 31): b - a = 21.
        let marked: Vec<usize> = (0..60).filter(|&i| gaps[i]).collect();
        assert_eq!(marked, (14..25).collect::<Vec<_>>());
    }
}
