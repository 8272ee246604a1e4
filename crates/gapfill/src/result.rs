//! Per-series reconstruction outcomes.

use serde::Serialize;

use crate::flags::Flag;
use crate::quantity::Quantity;
use crate::series::Series;

/// Which branch the reconstructor took for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// No valid observations; the series was left untouched.
    Skipped,
    /// Fewer than twelve populated months; long gaps took the overall mean.
    Mean,
    /// Long gaps took the low-pass trend plus the monthly climatology.
    SeasonalTrend,
}

/// Summary of one reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOutcome {
    strategy: FillStrategy,
    n_valid: usize,
    n_total: usize,
    n_trend: usize,
    n_interp: usize,
    n_mean: usize,
    n_clipped: usize,
}

impl SeriesOutcome {
    pub(crate) fn skipped(n_total: usize) -> Self {
        Self {
            strategy: FillStrategy::Skipped,
            n_valid: 0,
            n_total,
            n_trend: 0,
            n_interp: 0,
            n_mean: 0,
            n_clipped: 0,
        }
    }

    pub(crate) fn from_series(strategy: FillStrategy, n_valid: usize, series: &Series) -> Self {
        Self {
            strategy,
            n_valid,
            n_total: series.len(),
            n_trend: series.count_flag(Flag::SeasonalTrend),
            n_interp: series.count_flag(Flag::Interp),
            n_mean: series.count_flag(Flag::Mean),
            n_clipped: series.count_flag(Flag::Clipped),
        }
    }

    pub fn strategy(&self) -> FillStrategy {
        self.strategy
    }

    /// Valid observations before filling.
    pub fn n_valid(&self) -> usize {
        self.n_valid
    }

    /// Series length.
    pub fn n_total(&self) -> usize {
        self.n_total
    }

    /// Timesteps carrying `flag`.
    pub fn count(&self, flag: Flag) -> usize {
        match flag {
            Flag::SeasonalTrend => self.n_trend,
            Flag::Interp => self.n_interp,
            Flag::Mean => self.n_mean,
            Flag::Clipped => self.n_clipped,
        }
    }

    /// Timesteps filled by any method.
    pub fn n_filled(&self) -> usize {
        self.n_trend + self.n_interp + self.n_mean
    }
}

/// [`SeriesOutcome`] tagged with its site and quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    site: String,
    quantity: Quantity,
    #[serde(flatten)]
    outcome: SeriesOutcome,
}

impl SeriesReport {
    pub fn new(site: impl Into<String>, quantity: Quantity, outcome: SeriesOutcome) -> Self {
        Self {
            site: site.into(),
            quantity,
            outcome,
        }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn outcome(&self) -> &SeriesOutcome {
        &self.outcome
    }
}
