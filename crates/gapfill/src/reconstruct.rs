//! Seasonal-trend reconstruction of a single series.

use hydrofill_calendar::DailyAxis;
use hydrofill_filters::{FillInvalid, FilterError, HanningLowPass, LinearFill, LowPass};
use hydrofill_stats::{bin_mean, mean};
use tracing::{debug, info, warn};

use crate::config::ReconstructConfig;
use crate::error::GapFillError;
use crate::flags::Flag;
use crate::gaps::mark_gaps;
use crate::quantity::Quantity;
use crate::result::{FillStrategy, SeriesOutcome};
use crate::series::Series;

const MONTHS_PER_YEAR: usize = 12;

/// Fills every missing timestep of a [`Series`] and records how.
///
/// Long gaps take a candidate built from the monthly climatology plus a
/// low-pass trend of the deseasonalised observations (or the overall mean
/// when fewer than twelve months are populated). Short gaps and the edge
/// bands of long gaps are interpolated. Negative results are clipped.
///
/// The low-pass and interpolation primitives are pluggable through
/// [`Reconstructor::with_filters`].
#[derive(Debug, Clone)]
pub struct Reconstructor<L = HanningLowPass, F = LinearFill> {
    config: ReconstructConfig,
    lowpass: L,
    filler: F,
}

impl Reconstructor {
    /// Creates a reconstructor using the Hanning low-pass and linear filler.
    ///
    /// # Errors
    ///
    /// Returns [`GapFillError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: ReconstructConfig) -> Result<Self, GapFillError> {
        Self::with_filters(config, HanningLowPass, LinearFill)
    }
}

impl<L: LowPass, F: FillInvalid> Reconstructor<L, F> {
    /// Creates a reconstructor with custom filter primitives.
    ///
    /// # Errors
    ///
    /// Returns [`GapFillError::InvalidConfig`] if `config` fails validation.
    pub fn with_filters(config: ReconstructConfig, lowpass: L, filler: F) -> Result<Self, GapFillError> {
        config.validate()?;
        Ok(Self {
            config,
            lowpass,
            filler,
        })
    }

    pub fn config(&self) -> &ReconstructConfig {
        &self.config
    }

    /// Reconstructs `series` in place.
    ///
    /// Timesteps filled by an earlier run are reset first, so repeated calls
    /// give identical results. A series with no valid observation is left
    /// untouched and reported as [`FillStrategy::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`GapFillError::LengthMismatch`] if the series is not aligned
    /// to `axis`, or a [`GapFillError::Filter`] raised by a filter primitive.
    #[tracing::instrument(skip_all, fields(quantity = %quantity, n_total = series.len()))]
    pub fn reconstruct(
        &self,
        series: &mut Series,
        axis: &DailyAxis,
        quantity: Quantity,
    ) -> Result<SeriesOutcome, GapFillError> {
        if series.len() != axis.len() {
            return Err(GapFillError::LengthMismatch {
                field: "series",
                expected: axis.len(),
                got: series.len(),
            });
        }

        let n_reset = series.reset_filled();
        if n_reset > 0 {
            debug!(n_reset, "cleared previously filled timesteps");
        }
        if quantity.is_non_negative() {
            let n_clipped = series.clip_negative();
            if n_clipped > 0 {
                debug!(n_clipped, "clipped negative observations");
            }
        }

        let valid = series.valid_mask();
        let n_valid = valid.iter().filter(|&&v| v).count();
        if n_valid == 0 {
            info!("no valid data, skipping");
            return Ok(SeriesOutcome::skipped(series.len()));
        }
        info!(n_valid, "reconstructing");

        let (candidate, strategy) = self.candidate(series.values(), &valid, axis)?;
        let method = match strategy {
            FillStrategy::Mean => Flag::Mean,
            _ => Flag::SeasonalTrend,
        };

        let in_gap = mark_gaps(axis.days_of_year(), &valid, &self.config.gap_spec())?;
        for i in (0..series.len()).filter(|&i| in_gap[i]) {
            series.fill(i, candidate[i], method);
        }

        let still_missing: Vec<usize> = (0..series.len())
            .filter(|&i| !series.values()[i].is_finite())
            .collect();
        if !still_missing.is_empty() {
            let interpolated = self.filler.fill_invalid(series.values())?;
            for i in still_missing {
                series.fill(i, interpolated[i], Flag::Interp);
            }
        }

        if quantity.is_non_negative() {
            let n_clipped = series.clip_negative();
            if n_clipped > 0 {
                debug!(n_clipped, "clipped negative fills");
            }
        }

        Ok(SeriesOutcome::from_series(strategy, n_valid, series))
    }

    /// Builds the long-gap candidate for every timestep.
    fn candidate(
        &self,
        values: &[f64],
        valid: &[bool],
        axis: &DailyAxis,
    ) -> Result<(Vec<f64>, FillStrategy), GapFillError> {
        let n = values.len();
        let months: Vec<usize> = axis.calendar_months().iter().map(|&m| m as usize).collect();

        let (obs_months, obs): (Vec<usize>, Vec<f64>) = (0..n)
            .filter(|&i| valid[i])
            .map(|i| (months[i], values[i]))
            .unzip();
        let month_mean = bin_mean(&obs_months, &obs);
        let n_months = month_mean.iter().filter(|m| m.is_finite()).count();

        if n_months < MONTHS_PER_YEAR {
            let overall = mean(&obs);
            info!(n_months, fill_value = overall, "insufficient data for seasonal cycle, using mean");
            return Ok((vec![overall; n], FillStrategy::Mean));
        }

        let residual: Vec<f64> = (0..n)
            .map(|i| {
                if valid[i] {
                    values[i] - month_mean[months[i]]
                } else {
                    f64::NAN
                }
            })
            .collect();
        let smoothed = self.lowpass.lowpass(
            &residual,
            self.config.lowpass_days(),
            self.config.nan_weight_threshold(),
        )?;
        let trend = match self.filler.fill_invalid(&smoothed) {
            Ok(trend) => trend,
            Err(FilterError::NoValidData { .. }) => {
                warn!(
                    lowpass_days = self.config.lowpass_days(),
                    "low-pass trend has no valid output, using climatology alone"
                );
                vec![0.0; n]
            }
            Err(e) => return Err(e.into()),
        };

        let candidate = (0..n).map(|i| trend[i] + month_mean[months[i]]).collect();
        Ok((candidate, FillStrategy::SeasonalTrend))
    }
}
