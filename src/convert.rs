//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use hydrofill_calendar::{DailyAxis, parse_date};
use hydrofill_gapfill::{DoyWindow, Quantity, ReconstructConfig};
use hydrofill_io::{ColumnMapping, ColumnSpec, Compression, WriterConfig};

use crate::config::*;

/// Everything a run needs, validated.
#[derive(Debug)]
pub struct Plan {
    pub axis: DailyAxis,
    pub sites: Vec<String>,
    pub quantities: Vec<Quantity>,
    pub input_dir: PathBuf,
    pub mapping: ColumnMapping,
    pub reconstruct: ReconstructConfig,
    pub writer: WriterConfig,
}

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Parses quantity names, defaulting to every quantity.
pub fn parse_quantities(names: Option<&[String]>) -> Result<Vec<Quantity>> {
    let Some(names) = names else {
        return Ok(Quantity::ALL.to_vec());
    };
    if names.is_empty() {
        bail!("quantities must not be empty");
    }
    names
        .iter()
        .map(|n| n.parse::<Quantity>().map_err(anyhow::Error::from))
        .collect()
}

/// Builds the daily axis from the configured period.
pub fn build_axis(period: &PeriodToml) -> Result<DailyAxis> {
    let start = parse_date(&period.start).context("invalid [period].start")?;
    let end = parse_date(&period.end).context("invalid [period].end")?;
    DailyAxis::new(start, end).context("invalid [period]")
}

/// Builds a [`ColumnMapping`] from the TOML I/O configuration.
///
/// Without explicit `[[io.columns]]` the built-in plant-export headers are
/// used under the configured date column.
pub fn build_mapping(io: &IoToml) -> Result<ColumnMapping> {
    let mapping = match &io.columns {
        None => {
            let defaults = ColumnMapping::default();
            defaults
                .columns()
                .iter()
                .cloned()
                .fold(ColumnMapping::new(&io.date_column), ColumnMapping::with_column)
        }
        Some(columns) => {
            let mut mapping = ColumnMapping::new(&io.date_column);
            for c in columns {
                let quantity: Quantity = c
                    .quantity
                    .parse()
                    .with_context(|| format!("column '{}'", c.header))?;
                mapping = mapping.with_column(ColumnSpec::new(&c.header, quantity, c.scale));
            }
            mapping
        }
    };
    mapping.validate().context("invalid column mapping")?;
    Ok(mapping)
}

/// Builds a [`ReconstructConfig`] from the TOML reconstruct configuration.
pub fn build_reconstruct_config(r: &ReconstructToml) -> Result<ReconstructConfig> {
    let cfg = ReconstructConfig::new()
        .with_lowpass_days(r.lowpass_days)
        .with_short_gap_days(r.short_gap_days)
        .with_nan_weight_threshold(r.nan_weight_threshold)
        .with_window(DoyWindow::new(r.yearday_start, r.yearday_end))
        .with_include_ends(r.include_ends);
    cfg.validate().context("invalid [reconstruct] settings")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    let cfg = WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size);
    cfg.validate().context("invalid [io] writer settings")?;
    Ok(cfg)
}

/// Converts and validates a whole configuration.
pub fn build_plan(config: &HydrofillConfig) -> Result<Plan> {
    if config.sites.is_empty() {
        bail!("no sites configured");
    }
    Ok(Plan {
        axis: build_axis(&config.period)?,
        sites: config.sites.clone(),
        quantities: parse_quantities(config.quantities.as_deref())?,
        input_dir: config.io.input_dir.clone(),
        mapping: build_mapping(&config.io)?,
        reconstruct: build_reconstruct_config(&config.reconstruct)?,
        writer: build_writer_config(&config.io)?,
    })
}
