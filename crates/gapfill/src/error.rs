//! Error types for the hydrofill-gapfill crate.

/// Error type for all fallible operations in the hydrofill-gapfill crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GapFillError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a timestep index lies outside a series.
    #[error("index {index} out of range for series of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Series length.
        len: usize,
    },

    /// Returned when a persisted flag value carries unknown bits.
    #[error("invalid flag value: {bits} (known bits are 1, 2, 4 and 8)")]
    InvalidFlagBits {
        /// The rejected raw value.
        bits: i16,
    },

    /// Returned when a quantity name is not recognised.
    #[error("unknown quantity: '{name}'")]
    UnknownQuantity {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a site is not registered in a dataset.
    #[error("unknown site: '{site}'")]
    UnknownSite {
        /// The unregistered site.
        site: String,
    },

    /// Returned when a quantity is not tracked by a dataset.
    #[error("quantity {quantity} is not tracked by this dataset")]
    UntrackedQuantity {
        /// The untracked quantity name.
        quantity: String,
    },

    /// Filter error.
    #[error(transparent)]
    Filter(#[from] hydrofill_filters::FilterError),
}
