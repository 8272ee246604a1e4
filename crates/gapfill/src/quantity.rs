//! The tracked analytes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GapFillError;

/// A reconstructed quantity: plant discharge or one nutrient concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Quantity {
    /// Effluent discharge.
    #[serde(rename = "flow")]
    Flow,
    /// Nitrate concentration.
    #[serde(rename = "NO3_conc")]
    No3Conc,
    /// Tracked for completeness; no source column maps to it by default.
    #[serde(rename = "NO4_conc")]
    No4Conc,
    /// Nitrite concentration.
    #[serde(rename = "NO2_conc")]
    No2Conc,
    /// Nitrate plus nitrite concentration.
    #[serde(rename = "NN_conc")]
    NnConc,
    /// Ammonia concentration.
    #[serde(rename = "NH3_conc")]
    Nh3Conc,
    /// Ammonium concentration.
    #[serde(rename = "NH4_conc")]
    Nh4Conc,
    /// Phosphate concentration.
    #[serde(rename = "PO4_conc")]
    Po4Conc,
}

impl Quantity {
    /// Every quantity in export order.
    pub const ALL: [Quantity; 8] = [
        Quantity::Flow,
        Quantity::No3Conc,
        Quantity::No4Conc,
        Quantity::No2Conc,
        Quantity::NnConc,
        Quantity::Nh3Conc,
        Quantity::Nh4Conc,
        Quantity::Po4Conc,
    ];

    /// Column name used in exports and configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Quantity::Flow => "flow",
            Quantity::No3Conc => "NO3_conc",
            Quantity::No4Conc => "NO4_conc",
            Quantity::No2Conc => "NO2_conc",
            Quantity::NnConc => "NN_conc",
            Quantity::Nh3Conc => "NH3_conc",
            Quantity::Nh4Conc => "NH4_conc",
            Quantity::Po4Conc => "PO4_conc",
        }
    }

    /// Physical unit, if any.
    pub const fn units(self) -> Option<&'static str> {
        match self {
            Quantity::Flow => Some("m3 s-1"),
            Quantity::No3Conc
            | Quantity::No2Conc
            | Quantity::NnConc
            | Quantity::Nh3Conc
            | Quantity::Nh4Conc => Some("mg/l N"),
            Quantity::Po4Conc => Some("mg/l P"),
            Quantity::No4Conc => None,
        }
    }

    /// Whether reconstructed values must be clipped at zero.
    pub const fn is_non_negative(self) -> bool {
        true
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quantity {
    type Err = GapFillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Quantity::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GapFillError::UnknownQuantity {
                name: s.to_string(),
            })
    }
}
