//! # hydrofill-filters
//!
//! Signal primitives used by the reconstruction: a low-pass filter that
//! tolerates missing samples, and a filler that makes a signal fully dense.
//! Both are traits so the reconstruction can run against substitute
//! implementations.
//!
//! | Trait | Reference implementation |
//! |-------|--------------------------|
//! | [`LowPass`] | [`HanningLowPass`]: Hanning-window FIR, renormalised over valid samples |
//! | [`FillInvalid`] | [`LinearFill`]: linear interpolation, constant extrapolation |
//!
//! Missing samples are represented as NaN (any non-finite value is treated
//! as missing on input).

mod error;
mod fill;
mod lowpass;
mod window;

pub use error::FilterError;
pub use fill::{FillInvalid, LinearFill};
pub use lowpass::{HanningLowPass, LowPass};
pub use window::hanning;
