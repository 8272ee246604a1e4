//! Dense per-(site, quantity) value and flag arrays.

use crate::error::GapFillError;
use crate::flags::{Flag, FlagSet};

/// Daily values aligned to a time axis, with one [`FlagSet`] per timestep.
///
/// Missing values are stored as NaN. An untouched observation carries an
/// empty flag set.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    flags: Vec<FlagSet>,
}

impl Series {
    /// Creates an all-missing series of length `len`.
    pub fn missing(len: usize) -> Self {
        Self {
            values: vec![f64::NAN; len],
            flags: vec![FlagSet::EMPTY; len],
        }
    }

    /// Wraps raw observations; every flag starts empty.
    pub fn from_values(values: Vec<f64>) -> Self {
        let flags = vec![FlagSet::EMPTY; values.len()];
        Self { values, flags }
    }

    /// Rebuilds a series from previously exported values and flags.
    pub fn from_parts(values: Vec<f64>, flags: Vec<FlagSet>) -> Result<Self, GapFillError> {
        if flags.len() != values.len() {
            return Err(GapFillError::LengthMismatch {
                field: "flags",
                expected: values.len(),
                got: flags.len(),
            });
        }
        Ok(Self { values, flags })
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no timesteps.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values, NaN where missing.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-timestep flags.
    pub fn flags(&self) -> &[FlagSet] {
        &self.flags
    }

    /// Consumes the series, returning values and flags.
    pub fn into_parts(self) -> (Vec<f64>, Vec<FlagSet>) {
        (self.values, self.flags)
    }

    /// Stores an observation at `index`, clearing any flags there.
    pub fn set_observation(&mut self, index: usize, value: f64) -> Result<(), GapFillError> {
        let len = self.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(GapFillError::IndexOutOfRange { index, len })?;
        *slot = value;
        self.flags[index] = FlagSet::EMPTY;
        Ok(())
    }

    /// Returns `true` where the value is present and finite.
    pub fn valid_mask(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.is_finite()).collect()
    }

    /// Number of valid timesteps.
    pub fn n_valid(&self) -> usize {
        hydrofill_stats::count_finite(&self.values)
    }

    /// Number of missing timesteps.
    pub fn n_missing(&self) -> usize {
        self.len() - self.n_valid()
    }

    /// Number of timesteps carrying `flag`.
    pub fn count_flag(&self, flag: Flag) -> usize {
        self.flags.iter().filter(|f| f.contains(flag)).count()
    }

    /// Turns every previously filled timestep back into a missing one.
    pub(crate) fn reset_filled(&mut self) -> usize {
        let mut n_reset = 0;
        for (value, flags) in self.values.iter_mut().zip(self.flags.iter_mut()) {
            if flags.is_filled() {
                *value = f64::NAN;
                *flags = FlagSet::EMPTY;
                n_reset += 1;
            }
        }
        n_reset
    }

    /// Writes a filled value and records its method.
    pub(crate) fn fill(&mut self, index: usize, value: f64, method: Flag) {
        self.values[index] = value;
        self.flags[index].insert(method);
    }

    /// Replaces negative values with zero and flags them.
    pub(crate) fn clip_negative(&mut self) -> usize {
        let mut n_clipped = 0;
        for (value, flags) in self.values.iter_mut().zip(self.flags.iter_mut()) {
            if *value < 0.0 {
                *value = 0.0;
                flags.insert(Flag::Clipped);
                n_clipped += 1;
            }
        }
        n_clipped
    }
}
