//! The (site, quantity) → [`Series`] container and the parallel driver.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hydrofill_calendar::DailyAxis;
use hydrofill_filters::{FillInvalid, LowPass};
use rayon::prelude::*;
use tracing::info;

use crate::error::GapFillError;
use crate::quantity::Quantity;
use crate::reconstruct::Reconstructor;
use crate::result::{FillStrategy, SeriesReport};
use crate::series::Series;

/// Every tracked series of a run, aligned to one shared time axis.
///
/// Sites keep their configured order; series are keyed by site position and
/// quantity, so iteration follows (site, quantity) order.
#[derive(Debug, Clone)]
pub struct Dataset {
    axis: DailyAxis,
    sites: Vec<String>,
    quantities: Vec<Quantity>,
    series: BTreeMap<(usize, Quantity), Series>,
}

impl Dataset {
    /// Creates a dataset with an all-missing series for every pair.
    ///
    /// # Errors
    ///
    /// Returns [`GapFillError::InvalidConfig`] if a site name is blank or
    /// repeated, or a quantity is repeated.
    pub fn new(
        axis: DailyAxis,
        sites: Vec<String>,
        quantities: Vec<Quantity>,
    ) -> Result<Self, GapFillError> {
        for (i, site) in sites.iter().enumerate() {
            if site.trim().is_empty() {
                return Err(GapFillError::InvalidConfig {
                    reason: "site names must not be blank".to_string(),
                });
            }
            if sites[..i].contains(site) {
                return Err(GapFillError::InvalidConfig {
                    reason: format!("duplicate site: '{site}'"),
                });
            }
        }
        for (i, q) in quantities.iter().enumerate() {
            if quantities[..i].contains(q) {
                return Err(GapFillError::InvalidConfig {
                    reason: format!("duplicate quantity: {q}"),
                });
            }
        }

        let mut series = BTreeMap::new();
        for s in 0..sites.len() {
            for &q in &quantities {
                series.insert((s, q), Series::missing(axis.len()));
            }
        }
        Ok(Self {
            axis,
            sites,
            quantities,
            series,
        })
    }

    pub fn axis(&self) -> &DailyAxis {
        &self.axis
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn quantities(&self) -> &[Quantity] {
        &self.quantities
    }

    /// Number of (site, quantity) series.
    pub fn n_series(&self) -> usize {
        self.series.len()
    }

    fn site_index(&self, site: &str) -> Result<usize, GapFillError> {
        self.sites
            .iter()
            .position(|s| s == site)
            .ok_or_else(|| GapFillError::UnknownSite {
                site: site.to_string(),
            })
    }

    fn key(&self, site: &str, quantity: Quantity) -> Result<(usize, Quantity), GapFillError> {
        let s = self.site_index(site)?;
        if !self.quantities.contains(&quantity) {
            return Err(GapFillError::UntrackedQuantity {
                quantity: quantity.to_string(),
            });
        }
        Ok((s, quantity))
    }

    /// The series for `site` and `quantity`, if both are tracked.
    pub fn get(&self, site: &str, quantity: Quantity) -> Option<&Series> {
        let key = self.key(site, quantity).ok()?;
        self.series.get(&key)
    }

    /// Replaces the series for `site` and `quantity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair is not tracked or `series` is not
    /// aligned to the axis.
    pub fn insert(&mut self, site: &str, quantity: Quantity, series: Series) -> Result<(), GapFillError> {
        let key = self.key(site, quantity)?;
        if series.len() != self.axis.len() {
            return Err(GapFillError::LengthMismatch {
                field: "series",
                expected: self.axis.len(),
                got: series.len(),
            });
        }
        self.series.insert(key, series);
        Ok(())
    }

    /// Stores an observation on `date`.
    ///
    /// Returns `Ok(false)` without storing anything when `date` lies outside
    /// the axis. A later observation on the same date replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`GapFillError::UnknownSite`] or
    /// [`GapFillError::UntrackedQuantity`] for an unknown pair.
    pub fn record(
        &mut self,
        site: &str,
        quantity: Quantity,
        date: NaiveDate,
        value: f64,
    ) -> Result<bool, GapFillError> {
        let key = self.key(site, quantity)?;
        let Some(index) = self.axis.index_of(date) else {
            return Ok(false);
        };
        let Some(series) = self.series.get_mut(&key) else {
            return Err(GapFillError::UnknownSite {
                site: site.to_string(),
            });
        };
        series.set_observation(index, value)?;
        Ok(true)
    }

    /// Iterates over `(site, quantity, series)` in (site, quantity) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity, &Series)> {
        self.series
            .iter()
            .map(|(&(s, q), series)| (self.sites[s].as_str(), q, series))
    }
}

/// Reconstructs every series of `dataset` in parallel.
///
/// Each worker owns one series exclusively; the axis is shared read-only.
/// Reports come back in (site, quantity) order.
///
/// # Errors
///
/// Returns the first [`GapFillError`] raised by any series.
#[tracing::instrument(skip_all, fields(n_series = dataset.n_series()))]
pub fn reconstruct_dataset<L: LowPass, F: FillInvalid>(
    dataset: &mut Dataset,
    reconstructor: &Reconstructor<L, F>,
) -> Result<Vec<SeriesReport>, GapFillError> {
    let Dataset {
        axis, sites, series, ..
    } = dataset;
    let axis = &*axis;
    let sites = &*sites;

    let reports: Vec<SeriesReport> = series
        .par_iter_mut()
        .map(|(&(s, quantity), series)| -> Result<SeriesReport, GapFillError> {
            let site = sites[s].as_str();
            let _span = tracing::info_span!("series", site).entered();
            let outcome = reconstructor.reconstruct(series, axis, quantity)?;
            Ok(SeriesReport::new(site, quantity, outcome))
        })
        .collect::<Result<_, _>>()?;

    let n_skipped = reports
        .iter()
        .filter(|r| r.outcome().strategy() == FillStrategy::Skipped)
        .count();
    info!(n_series = reports.len(), n_skipped, "reconstruction complete");
    Ok(reports)
}
