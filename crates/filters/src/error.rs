//! Error types for the hydrofill-filters crate.

/// Error type for all fallible operations in the hydrofill-filters crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Returned when a filter window is too short to carry any weight.
    #[error("invalid window: {window} days (must be at least {min})")]
    InvalidWindow {
        /// Requested window length.
        window: usize,
        /// Minimum accepted window length.
        min: usize,
    },

    /// Returned when the missing-weight threshold is outside `[0, 1]`.
    #[error("invalid nan weight threshold: {value} (must be within 0..=1)")]
    InvalidThreshold {
        /// The rejected threshold.
        value: f64,
    },

    /// Returned when a signal has no valid sample to fill from.
    #[error("signal of length {len} has no valid samples")]
    NoValidData {
        /// Length of the signal.
        len: usize,
    },
}
