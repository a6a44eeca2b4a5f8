//! Forecasting models.

mod traits;

pub mod ssa;

pub use ssa::{Ssa, SsaParams};
pub use traits::Forecaster;
