//! # matchcast
//!
//! Short-horizon forecasting for match-goals (and similar count-like)
//! time series using Singular Spectrum Analysis (SSA).
//!
//! The crate covers the full small pipeline: durable storage of match
//! records, CSV ingestion, series loading and chronological splitting,
//! SSA fit/forecast with confidence bounds, checkpoint/restore, rolling
//! one-step evaluation, and console-style report rendering.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod evaluate;
pub mod ingest;
pub mod models;
pub mod report;
pub mod store;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, MatchRecord, Series};
    pub use crate::error::{ForecastError, Result};
    pub use crate::evaluate::{evaluate, EvaluationMetrics};
    pub use crate::models::ssa::{Ssa, SsaParams};
    pub use crate::models::Forecaster;
    pub use crate::utils::quantile_normal;
}
