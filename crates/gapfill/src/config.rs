//! Reconstruction parameters.

use crate::error::GapFillError;
use crate::gaps::{DoyWindow, GapSpec};

/// Configuration for [`Reconstructor`](crate::Reconstructor).
///
/// Defaults: a three-year low-pass window, 45-day short-gap threshold, 1 %
/// missing-weight tolerance, full-year window with end extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructConfig {
    lowpass_days: usize,
    short_gap_days: usize,
    nan_weight_threshold: f64,
    window: DoyWindow,
    include_ends: bool,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconstructConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            lowpass_days: 3 * 365,
            short_gap_days: 45,
            nan_weight_threshold: 0.01,
            window: DoyWindow::FULL_YEAR,
            include_ends: true,
        }
    }

    /// Sets the trend low-pass window length in days.
    pub fn with_lowpass_days(mut self, days: usize) -> Self {
        self.lowpass_days = days;
        self
    }

    /// Sets the gap length above which the seasonal-trend candidate is used.
    pub fn with_short_gap_days(mut self, days: usize) -> Self {
        self.short_gap_days = days;
        self
    }

    /// Sets the minimum fraction of window weight that must be valid.
    pub fn with_nan_weight_threshold(mut self, threshold: f64) -> Self {
        self.nan_weight_threshold = threshold;
        self
    }

    /// Sets the day-of-year window for gap detection.
    pub fn with_window(mut self, window: DoyWindow) -> Self {
        self.window = window;
        self
    }

    /// Enables or disables end-of-series gap extension.
    pub fn with_include_ends(mut self, include_ends: bool) -> Self {
        self.include_ends = include_ends;
        self
    }

    pub fn lowpass_days(&self) -> usize {
        self.lowpass_days
    }

    pub fn short_gap_days(&self) -> usize {
        self.short_gap_days
    }

    pub fn nan_weight_threshold(&self) -> f64 {
        self.nan_weight_threshold
    }

    pub fn window(&self) -> DoyWindow {
        self.window
    }

    pub fn include_ends(&self) -> bool {
        self.include_ends
    }

    /// Gap detector parameters derived from this configuration.
    pub fn gap_spec(&self) -> GapSpec {
        GapSpec::new(self.short_gap_days)
            .with_window(self.window)
            .with_include_ends(self.include_ends)
    }

    /// Validates parameter ranges and consistency.
    pub fn validate(&self) -> Result<(), GapFillError> {
        if self.lowpass_days < 3 {
            return Err(GapFillError::InvalidConfig {
                reason: format!("lowpass_days must be at least 3, got {}", self.lowpass_days),
            });
        }
        if !(0.0..=1.0).contains(&self.nan_weight_threshold) {
            return Err(GapFillError::InvalidConfig {
                reason: format!(
                    "nan_weight_threshold must be within 0..=1, got {}",
                    self.nan_weight_threshold
                ),
            });
        }
        if self.short_gap_days >= self.lowpass_days {
            return Err(GapFillError::InvalidConfig {
                reason: format!(
                    "short_gap_days ({}) must be shorter than lowpass_days ({})",
                    self.short_gap_days, self.lowpass_days
                ),
            });
        }
        self.gap_spec().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ReconstructConfig::new();
        assert_eq!(c.lowpass_days(), 1095);
        assert_eq!(c.short_gap_days(), 45);
        assert_eq!(c.nan_weight_threshold(), 0.01);
        assert_eq!(c.window(), DoyWindow::FULL_YEAR);
        assert!(c.include_ends());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let c = ReconstructConfig::new()
            .with_lowpass_days(365)
            .with_short_gap_days(20)
            .with_nan_weight_threshold(0.5)
            .with_include_ends(false)
            .with_window(DoyWindow::new(60, 300));
        assert_eq!(c.lowpass_days(), 365);
        assert_eq!(c.short_gap_days(), 20);
        assert_eq!(c.nan_weight_threshold(), 0.5);
        assert!(!c.include_ends());
        assert!(c.validate().is_ok());
        assert_eq!(c.gap_spec().min_gap_days(), 20);
    }

    #[test]
    fn threshold_out_of_range() {
        let c = ReconstructConfig::new().with_nan_weight_threshold(1.5);
        assert!(c.validate().is_err());
        let c = ReconstructConfig::new().with_nan_weight_threshold(f64::NAN);
        assert!(c.validate().is_err());
    }

    #[test]
    fn short_gap_not_shorter_than_lowpass() {
        let c = ReconstructConfig::new()
            .with_lowpass_days(30)
            .with_short_gap_days(30);
        assert!(c.validate().is_err());
    }

    #[test]
    fn tiny_lowpass_window() {
        let c = ReconstructConfig::new().with_lowpass_days(2);
        assert!(c.validate().is_err());
    }

    #[test]
    fn ends_require_full_year_window() {
        let c = ReconstructConfig::new().with_window(DoyWindow::new(0, 300));
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("full-year window"));
    }
}
