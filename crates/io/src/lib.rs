//! # hydrofill-io
//!
//! Loads per-site observation CSVs into a [`Dataset`](hydrofill_gapfill::Dataset)
//! and exports reconstructed series to Parquet (with units and flag
//! metadata) or to one CSV per site.
//!
//! | Module | Direction | Format |
//! |--------|-----------|--------|
//! | `loader` / `csv_read` | in | `<site>.csv` with a date column and mapped analyte columns |
//! | `writer` / `parquet_write` | out | one Parquet file, rows indexed by (site, date) |
//! | `parquet_read` | in | Parquet written by `write_parquet` |
//! | `csv_write` | out | `<site>.csv`, value and flag column per quantity |

mod csv_read;
mod csv_write;
mod error;
mod loader;
mod mapping;
mod parquet_read;
mod parquet_write;
mod writer;

pub use csv_write::write_site_csvs;
pub use error::IoError;
pub use loader::{LoadSummary, SiteLoad, load_dataset};
pub use mapping::{ColumnMapping, ColumnSpec, MGD_TO_M3_PER_S};
pub use parquet_read::read_parquet;
pub use writer::{Compression, WriterConfig, write_parquet};
