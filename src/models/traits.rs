//! Forecaster trait defining the interface a fitted model exposes.

use crate::core::Forecast;
use crate::error::Result;

/// Interface of a fitted forecasting model.
///
/// Fitting itself is model-specific and constructs the model; this
/// trait covers what a fitted model can do: project forward and roll
/// its anchor over observed values. Implementations are not safe for concurrent use; callers
/// serialize access.
pub trait Forecaster {
    /// Produce `steps` future points with confidence bounds, counted
    /// from the current anchor position. Does not advance the anchor.
    fn forecast(&self, steps: usize) -> Result<Forecast>;

    /// Feed one observed value, advancing the anchor one tick so
    /// subsequent forecasts start after it.
    fn advance(&mut self, actual: f64);

    /// Configured default horizon.
    fn horizon(&self) -> usize;

    /// Model name.
    fn name(&self) -> &str;
}
