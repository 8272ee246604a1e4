use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level hydrofill configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HydrofillConfig {
    /// Sites to load, in export order.
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,

    /// Quantities to reconstruct; all of them when absent.
    #[serde(default)]
    pub quantities: Option<Vec<String>>,

    /// Reconstruction period.
    #[serde(default)]
    pub period: PeriodToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Gap-filling settings.
    #[serde(default)]
    pub reconstruct: ReconstructToml,
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<HydrofillConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

fn default_sites() -> Vec<String> {
    [
        "Davis",
        "Manteca",
        "Tracy",
        "Stockton",
        "RegionalSan",
        "Sacramento",
        "SanJoaquin",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
}

impl Default for PeriodToml {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

fn default_start() -> String {
    "2000-01-01".to_string()
}
fn default_end() -> String {
    "2016-12-31".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    pub output: Option<PathBuf>,
    pub csv_dir: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Replaces the built-in header mapping when present.
    #[serde(default)]
    pub columns: Option<Vec<ColumnToml>>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output: None,
            csv_dir: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
            date_column: default_date_column(),
            columns: None,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("outputs/intermediate/delta")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}
fn default_date_column() -> String {
    "Date".to_string()
}

/// One source header feeding a quantity.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnToml {
    pub header: String,
    pub quantity: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconstructToml {
    #[serde(default = "default_lowpass_days")]
    pub lowpass_days: usize,
    #[serde(default = "default_short_gap_days")]
    pub short_gap_days: usize,
    #[serde(default = "default_nan_weight_threshold")]
    pub nan_weight_threshold: f64,
    #[serde(default = "default_yearday_start")]
    pub yearday_start: i32,
    #[serde(default = "default_yearday_end")]
    pub yearday_end: i32,
    #[serde(default = "default_true")]
    pub include_ends: bool,
}

impl Default for ReconstructToml {
    fn default() -> Self {
        Self {
            lowpass_days: default_lowpass_days(),
            short_gap_days: default_short_gap_days(),
            nan_weight_threshold: default_nan_weight_threshold(),
            yearday_start: default_yearday_start(),
            yearday_end: default_yearday_end(),
            include_ends: true,
        }
    }
}

fn default_lowpass_days() -> usize {
    3 * 365
}
fn default_short_gap_days() -> usize {
    45
}
fn default_nan_weight_threshold() -> f64 {
    0.01
}
fn default_yearday_start() -> i32 {
    -1
}
fn default_yearday_end() -> i32 {
    367
}
fn default_true() -> bool {
    true
}
