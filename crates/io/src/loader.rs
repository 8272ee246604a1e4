//! Populates a [`Dataset`] from one CSV file per site.

use std::path::Path;

use hydrofill_gapfill::Dataset;
use serde::Serialize;
use tracing::{debug, info};

use crate::csv_read::parse_site_csv;
use crate::error::IoError;
use crate::mapping::ColumnMapping;

/// What was loaded for one site.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteLoad {
    pub site: String,
    /// Data rows in the file.
    pub n_rows: usize,
    /// Samples stored into the dataset.
    pub n_samples: usize,
    /// Samples dropped because their date lies outside the axis.
    pub n_outside: usize,
    /// Mapped headers the file does not have.
    pub missing_columns: Vec<String>,
}

/// Per-site load statistics, in site order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    pub sites: Vec<SiteLoad>,
}

impl LoadSummary {
    /// Samples stored across all sites.
    pub fn n_samples(&self) -> usize {
        self.sites.iter().map(|s| s.n_samples).sum()
    }

    /// Samples dropped across all sites.
    pub fn n_outside(&self) -> usize {
        self.sites.iter().map(|s| s.n_outside).sum()
    }
}

/// Reads `<input_dir>/<site>.csv` for every site of `dataset`.
///
/// Samples for quantities the dataset does not track are ignored. When two
/// rows share a date the later one wins.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if a site file is missing, an
/// [`IoError::Validation`] for an invalid mapping, or any parse error from
/// the site files.
#[tracing::instrument(skip_all, fields(input_dir = %input_dir.display()))]
pub fn load_dataset(
    input_dir: &Path,
    dataset: &mut Dataset,
    mapping: &ColumnMapping,
) -> Result<LoadSummary, IoError> {
    mapping.validate()?;

    let sites: Vec<String> = dataset.sites().to_vec();
    let mut summary = LoadSummary::default();
    for site in sites {
        let path = input_dir.join(format!("{site}.csv"));
        if !path.exists() {
            return Err(IoError::FileNotFound { path });
        }
        let text = std::fs::read_to_string(&path).map_err(|e| IoError::io(&path, e))?;
        let table = parse_site_csv(&text, &path, mapping)?;

        let mut load = SiteLoad {
            site: site.clone(),
            n_rows: table.rows.len(),
            missing_columns: table.missing_columns,
            ..SiteLoad::default()
        };
        for row in &table.rows {
            for &(quantity, value) in &row.samples {
                if !dataset.quantities().contains(&quantity) {
                    continue;
                }
                if dataset.record(&site, quantity, row.date, value)? {
                    load.n_samples += 1;
                } else {
                    load.n_outside += 1;
                }
            }
        }

        if !load.missing_columns.is_empty() {
            debug!(site = %site, columns = ?load.missing_columns, "mapped columns absent");
        }
        if load.n_outside > 0 {
            debug!(site = %site, n_outside = load.n_outside, "dropped samples outside the period");
        }
        info!(
            site = %site,
            n_rows = load.n_rows,
            n_samples = load.n_samples,
            "loaded site"
        );
        summary.sites.push(load);
    }

    Ok(summary)
}
