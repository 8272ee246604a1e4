//! Per-timestep provenance flags.
//!
//! A [`FlagSet`] records which method produced a reconstructed value. The
//! three fill methods ([`Flag::SeasonalTrend`], [`Flag::Interp`],
//! [`Flag::Mean`]) are mutually exclusive; [`Flag::Clipped`] may combine
//! with any of them or stand alone on a clipped observation.

use std::fmt;
use std::ops::BitOr;

use crate::error::GapFillError;

/// A single provenance flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Filled from the low-pass trend plus the monthly climatology.
    SeasonalTrend,
    /// Filled by interpolation between neighbouring values.
    Interp,
    /// Filled with the mean of all valid observations.
    Mean,
    /// Negative value replaced by zero.
    Clipped,
}

impl Flag {
    /// All flags in bit order.
    pub const ALL: [Flag; 4] = [Flag::SeasonalTrend, Flag::Interp, Flag::Mean, Flag::Clipped];

    /// Bit value used in the persisted bitmask.
    pub const fn bit(self) -> u8 {
        match self {
            Flag::SeasonalTrend => 1,
            Flag::Interp => 2,
            Flag::Mean => 4,
            Flag::Clipped => 8,
        }
    }

    /// Short name used in exported metadata.
    pub const fn label(self) -> &'static str {
        match self {
            Flag::SeasonalTrend => "Trend",
            Flag::Interp => "Interp",
            Flag::Mean => "Mean",
            Flag::Clipped => "Clipped",
        }
    }

    /// Whether this flag names a fill method rather than a post-processing step.
    pub const fn is_fill_method(self) -> bool {
        !matches!(self, Flag::Clipped)
    }

    /// Space-separated bit values, e.g. `"1 2 4 8"`.
    pub fn values_attribute() -> String {
        Flag::ALL
            .iter()
            .map(|f| f.bit().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Space-separated labels, e.g. `"Trend Interp Mean Clipped"`.
    pub fn meanings_attribute() -> String {
        Flag::ALL
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const KNOWN_BITS: u8 = 0b1111;
const FILL_BITS: u8 = 0b0111;

/// Set of [`Flag`]s attached to one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagSet(u8);

impl FlagSet {
    /// No flags: an untouched observation or a missing value.
    pub const EMPTY: FlagSet = FlagSet(0);

    /// Returns `true` if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `flag` is set.
    pub const fn contains(self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Adds `flag` to the set.
    pub fn insert(&mut self, flag: Flag) {
        self.0 |= flag.bit();
    }

    /// Returns `true` if any fill-method flag is set.
    pub const fn is_filled(self) -> bool {
        self.0 & FILL_BITS != 0
    }

    /// The fill method recorded in this set, if any.
    pub fn fill_method(self) -> Option<Flag> {
        self.iter().find(|f| f.is_fill_method())
    }

    /// Iterates over the set flags in bit order.
    pub fn iter(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |&f| self.contains(f))
    }

    /// Persisted integer form.
    pub const fn to_bits(self) -> i16 {
        self.0 as i16
    }

    /// Parses a persisted integer, rejecting unknown bits and more than one
    /// fill method.
    pub fn from_bits(bits: i16) -> Result<Self, GapFillError> {
        let raw = u8::try_from(bits)
            .ok()
            .filter(|b| b & !KNOWN_BITS == 0)
            .ok_or(GapFillError::InvalidFlagBits { bits })?;
        if (raw & FILL_BITS).count_ones() > 1 {
            return Err(GapFillError::InvalidFlagBits { bits });
        }
        Ok(FlagSet(raw))
    }
}

impl From<Flag> for FlagSet {
    fn from(flag: Flag) -> Self {
        FlagSet(flag.bit())
    }
}

impl BitOr<Flag> for FlagSet {
    type Output = FlagSet;

    fn bitor(self, rhs: Flag) -> FlagSet {
        FlagSet(self.0 | rhs.bit())
    }
}

impl BitOr for Flag {
    type Output = FlagSet;

    fn bitor(self, rhs: Flag) -> FlagSet {
        FlagSet(self.bit() | rhs.bit())
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let labels: Vec<&str> = self.iter().map(Flag::label).collect();
        f.write_str(&labels.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_distinct_powers_of_two() {
        let mut seen = 0u8;
        for flag in Flag::ALL {
            assert!(flag.bit().is_power_of_two());
            assert_eq!(seen & flag.bit(), 0);
            seen |= flag.bit();
        }
        assert_eq!(seen, KNOWN_BITS);
    }

    #[test]
    fn metadata_attributes() {
        assert_eq!(Flag::values_attribute(), "1 2 4 8");
        assert_eq!(Flag::meanings_attribute(), "Trend Interp Mean Clipped");
    }

    #[test]
    fn insert_and_contains() {
        let mut set = FlagSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Flag::Interp);
        assert!(set.contains(Flag::Interp));
        assert!(!set.contains(Flag::Mean));
        assert!(set.is_filled());
        assert_eq!(set.fill_method(), Some(Flag::Interp));
    }

    #[test]
    fn clipped_alone_is_not_filled() {
        let set = FlagSet::from(Flag::Clipped);
        assert!(!set.is_filled());
        assert_eq!(set.fill_method(), None);
    }

    #[test]
    fn union_operators() {
        let set = Flag::Mean | Flag::Clipped;
        assert_eq!(set.to_bits(), 12);
        let set = FlagSet::EMPTY | Flag::SeasonalTrend;
        assert_eq!(set.to_bits(), 1);
    }

    #[test]
    fn from_bits_accepts_known_combinations() {
        for bits in [0, 1, 2, 4, 8, 9, 10, 12] {
            let set = FlagSet::from_bits(bits).unwrap();
            assert_eq!(set.to_bits(), bits);
        }
    }

    #[test]
    fn from_bits_rejects_unknown_bits() {
        assert!(FlagSet::from_bits(16).is_err());
        assert!(FlagSet::from_bits(-1).is_err());
        assert!(FlagSet::from_bits(256).is_err());
    }

    #[test]
    fn from_bits_rejects_two_fill_methods() {
        let err = FlagSet::from_bits(3).unwrap_err();
        assert_eq!(err, GapFillError::InvalidFlagBits { bits: 3 });
    }

    #[test]
    fn display() {
        assert_eq!(FlagSet::EMPTY.to_string(), "-");
        assert_eq!((Flag::Interp | Flag::Clipped).to_string(), "Interp|Clipped");
    }
}
