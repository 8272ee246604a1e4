//! # hydrofill-gapfill
//!
//! Reconstructs gap-free daily series from sparse samples and records, per
//! timestep, which method produced each value.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐   ┌──────────┐
//!  │ reset filled │──▶│ monthly climatol. │──▶│ long gaps:    │──▶│ short    │──▶ clip < 0
//!  │ timesteps    │   │ + low-pass trend  │   │ trend+season  │   │ gaps:    │
//!  └──────────────┘   │ (or flat mean)    │   │ (or mean)     │   │ interp   │
//!                     └──────────────────┘   └───────────────┘   └──────────┘
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use hydrofill_gapfill::{Dataset, Quantity, ReconstructConfig, Reconstructor, reconstruct_dataset};
//!
//! let mut dataset = Dataset::new(axis, vec!["Davis".into()], Quantity::ALL.to_vec())?;
//! dataset.record("Davis", Quantity::Flow, date, 1.7)?;
//! let reconstructor = Reconstructor::new(ReconstructConfig::new())?;
//! let reports = reconstruct_dataset(&mut dataset, &reconstructor)?;
//! ```

mod config;
mod dataset;
mod error;
mod flags;
mod gaps;
mod quantity;
mod reconstruct;
mod result;
mod series;

pub use config::ReconstructConfig;
pub use dataset::{Dataset, reconstruct_dataset};
pub use error::GapFillError;
pub use flags::{Flag, FlagSet};
pub use gaps::{DoyWindow, GapSpec, mark_gaps};
pub use quantity::Quantity;
pub use reconstruct::Reconstructor;
pub use result::{FillStrategy, SeriesOutcome, SeriesReport};
pub use series::Series;
