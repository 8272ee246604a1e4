//! Synthesize command: load site observations, reconstruct, export.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use hydrofill_gapfill::{Dataset, FillStrategy, Quantity, Reconstructor, SeriesReport, reconstruct_dataset};
use hydrofill_io::{LoadSummary, load_dataset, read_parquet, write_parquet, write_site_csvs};

use crate::cli::SynthesizeArgs;
use crate::config;
use crate::convert::{self, Plan};

/// Settings echoed into the run report.
#[derive(Debug, Serialize)]
struct Settings {
    start: String,
    end: String,
    sites: Vec<String>,
    quantities: Vec<Quantity>,
    lowpass_days: usize,
    short_gap_days: usize,
    nan_weight_threshold: f64,
    yearday_start: i32,
    yearday_end: i32,
    include_ends: bool,
}

impl Settings {
    fn new(plan: &Plan, dataset: &Dataset) -> Self {
        let r = &plan.reconstruct;
        Self {
            start: dataset.axis().start().to_string(),
            end: dataset.axis().end().to_string(),
            sites: dataset.sites().to_vec(),
            quantities: dataset.quantities().to_vec(),
            lowpass_days: r.lowpass_days(),
            short_gap_days: r.short_gap_days(),
            nan_weight_threshold: r.nan_weight_threshold(),
            yearday_start: r.window().start(),
            yearday_end: r.window().end(),
            include_ends: r.include_ends(),
        }
    }
}

/// JSON document written next to the Parquet output.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    settings: Settings,
    load: &'a LoadSummary,
    series: &'a [SeriesReport],
}

/// Run the full load, reconstruct and export pipeline.
pub fn run(args: SynthesizeArgs) -> Result<()> {
    let _cmd = info_span!("synthesize").entered();

    // 1. Load and validate configuration
    let config = config::load(&args.config)?;
    let plan = convert::build_plan(&config)?;
    let output = args
        .output
        .or_else(|| config.io.output.clone())
        .ok_or_else(|| anyhow::anyhow!("no output path: set [io].output in config or use --output"))?;

    // 2. Load observations, or a previous export when re-running
    let (mut dataset, summary) = match &args.from {
        Some(previous) => load_previous(previous)?,
        None => load_sites(&plan)?,
    };

    // 3. Reconstruct every series
    let reconstructor = Reconstructor::new(plan.reconstruct.clone())
        .context("invalid reconstruction settings")?;
    let reports = reconstruct_dataset(&mut dataset, &reconstructor).context("reconstruction failed")?;
    log_outcomes(&reports);

    // 4. Export
    info!(path = %output.display(), "writing reconstructed series");
    write_parquet(&output, &dataset, &plan.writer)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;

    if let Some(dir) = &config.io.csv_dir {
        write_site_csvs(dir, &dataset)
            .with_context(|| format!("failed to write per-site CSV to {}", dir.display()))?;
    }

    // 5. Run report
    let report = RunReport {
        settings: Settings::new(&plan, &dataset),
        load: &summary,
        series: &reports,
    };
    write_report(&output, &report)?;

    Ok(())
}

fn load_sites(plan: &Plan) -> Result<(Dataset, LoadSummary)> {
    let mut dataset = Dataset::new(plan.axis.clone(), plan.sites.clone(), plan.quantities.clone())
        .context("failed to build dataset")?;
    let summary = load_dataset(&plan.input_dir, &mut dataset, &plan.mapping)
        .with_context(|| format!("failed to load site files from {}", plan.input_dir.display()))?;
    info!(
        n_sites = summary.sites.len(),
        n_samples = summary.n_samples(),
        n_outside = summary.n_outside(),
        "observations loaded"
    );
    Ok((dataset, summary))
}

/// Reads an earlier export. Filled timesteps are reset by the reconstructor,
/// so only observations carry over; axis, sites and quantities come from
/// the file.
fn load_previous(path: &Path) -> Result<(Dataset, LoadSummary)> {
    let dataset = read_parquet(path)
        .with_context(|| format!("failed to read previous export: {}", path.display()))?;
    info!(
        path = %path.display(),
        n_series = dataset.n_series(),
        n_days = dataset.axis().len(),
        "previous export loaded"
    );
    Ok((dataset, LoadSummary::default()))
}

fn log_outcomes(reports: &[SeriesReport]) {
    let count = |s: FillStrategy| reports.iter().filter(|r| r.outcome().strategy() == s).count();
    info!(
        n_seasonal_trend = count(FillStrategy::SeasonalTrend),
        n_mean = count(FillStrategy::Mean),
        n_skipped = count(FillStrategy::Skipped),
        "series reconstructed"
    );
}

/// Writes `{output_stem}.report.json`.
fn write_report(output: &Path, report: &RunReport<'_>) -> Result<()> {
    let path = output.with_extension("report.json");
    let json = serde_json::to_string_pretty(report).context("failed to serialise run report")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write run report: {}", path.display()))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn end_to_end_on_small_inputs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = dir.path().join("in");
        fs::create_dir_all(&input).unwrap();

        let mut davis = String::from("Date,flow mgd,NO3 mg/L N\n");
        let mut date = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2002, 12, 31).unwrap();
        let mut i = 0;
        while date <= end {
            if i % 5 != 2 {
                davis.push_str(&format!("{date},{},\n", 2.0 + (i as f64 / 30.0).sin()));
            }
            date = date.succ_opt().unwrap();
            i += 1;
        }
        fs::write(input.join("Davis.csv"), davis).unwrap();
        fs::write(input.join("Tracy.csv"), "Date,NO3 mg/L N\n2001-03-01,12.0\n").unwrap();

        let output = dir.path().join("out").join("potw.parquet");
        fs::create_dir_all(output.parent().unwrap()).unwrap();
        let csv_dir = dir.path().join("csv");
        let config_path = dir.path().join("hydrofill.toml");
        fs::write(
            &config_path,
            format!(
                "sites = [\"Davis\", \"Tracy\"]\n\
                 quantities = [\"flow\", \"NO3_conc\"]\n\
                 [period]\nstart = \"2001-01-01\"\nend = \"2002-12-31\"\n\
                 [io]\ninput_dir = {:?}\ncsv_dir = {:?}\n\
                 [reconstruct]\nlowpass_days = 365\n",
                input.display().to_string(),
                csv_dir.display().to_string(),
            ),
        )
        .unwrap();

        run(SynthesizeArgs {
            config: config_path.clone(),
            output: Some(output.clone()),
            from: None,
        })
        .unwrap();

        assert!(output.exists());
        assert!(csv_dir.join("Davis.csv").exists());
        assert!(csv_dir.join("Tracy.csv").exists());

        let report_path: PathBuf = output.with_extension("report.json");
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
        let series = report["series"].as_array().unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series[0]["site"], "Davis");
        assert_eq!(series[0]["quantity"], "flow");
        assert_eq!(series[0]["strategy"], "seasonal_trend");
        assert_eq!(series[1]["strategy"], "skipped");
        assert_eq!(series[3]["quantity"], "NO3_conc");
        assert_eq!(series[3]["strategy"], "mean");
        assert_eq!(report["settings"]["lowpass_days"], 365);
        assert_eq!(report["settings"]["start"], "2001-01-01");
        assert_eq!(report["load"]["sites"][1]["n_samples"], 1);

        // Re-running on the export reproduces the same fills.
        let rerun = dir.path().join("out").join("rerun.parquet");
        run(SynthesizeArgs {
            config: config_path,
            output: Some(rerun.clone()),
            from: Some(output.clone()),
        })
        .unwrap();
        let again: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(rerun.with_extension("report.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(again["series"], report["series"]);
        assert_eq!(again["settings"], report["settings"]);
        assert!(again["load"]["sites"].as_array().unwrap().is_empty());

        let first = hydrofill_io::read_parquet(&output).unwrap();
        let second = hydrofill_io::read_parquet(&rerun).unwrap();
        for (site, q, series) in first.iter() {
            let other = second.get(site, q).unwrap();
            assert_eq!(series.flags(), other.flags());
            for (a, b) in series.values().iter().zip(other.values()) {
                assert!(a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()));
            }
        }
    }

    #[test]
    fn rerun_from_missing_export_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("hydrofill.toml");
        fs::write(
            &config_path,
            "sites = [\"Davis\"]\n[period]\nstart = \"2001-01-01\"\nend = \"2001-12-31\"\n",
        )
        .unwrap();
        let err = run(SynthesizeArgs {
            config: config_path,
            output: Some(dir.path().join("out.parquet")),
            from: Some(dir.path().join("absent.parquet")),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read previous export"));
    }

    #[test]
    fn missing_output_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("hydrofill.toml");
        fs::write(&config_path, "sites = [\"Davis\"]\n").unwrap();
        let err = run(SynthesizeArgs {
            config: config_path,
            output: None,
            from: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("no output path"));
    }
}
