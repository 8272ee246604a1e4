//! One CSV file per site.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hydrofill_gapfill::Dataset;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write::flag_column;

/// Writes `<dir>/<site>.csv` for every site, creating `dir` if needed.
///
/// Columns are `date`, then `<quantity>` and `<quantity>_flag` for each
/// tracked quantity. Missing values are left empty. Returns the written
/// paths in site order.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the directory or a file cannot be written.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn write_site_csvs(dir: &Path, dataset: &Dataset) -> Result<Vec<PathBuf>, IoError> {
    std::fs::create_dir_all(dir).map_err(|e| IoError::io(dir, e))?;

    let mut header = vec!["date".to_string()];
    for &q in dataset.quantities() {
        header.push(q.name().to_string());
        header.push(flag_column(q));
    }
    let header = header.join(",");

    let mut written = Vec::with_capacity(dataset.sites().len());
    for site in dataset.sites() {
        let path = dir.join(format!("{site}.csv"));
        let series: Vec<_> = dataset
            .quantities()
            .iter()
            .filter_map(|&q| dataset.get(site, q))
            .collect();

        let file = File::create(&path).map_err(|e| IoError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        let io_err = |e| IoError::io(&path, e);

        writeln!(out, "{header}").map_err(io_err)?;
        for (i, date) in dataset.axis().dates().iter().enumerate() {
            write!(out, "{date}").map_err(io_err)?;
            for s in &series {
                let v = s.values()[i];
                if v.is_finite() {
                    write!(out, ",{v},{}", s.flags()[i].to_bits()).map_err(io_err)?;
                } else {
                    write!(out, ",,{}", s.flags()[i].to_bits()).map_err(io_err)?;
                }
            }
            writeln!(out).map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;

        written.push(path);
    }

    info!(n_files = written.len(), "wrote per-site csv");
    Ok(written)
}
