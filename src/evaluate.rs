//! Rolling one-step-ahead evaluation of a fitted model.

use crate::core::Series;
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::metrics::calculate_metrics;

/// Aggregate error metrics from an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationMetrics {
    /// Mean Absolute Error.
    pub mae: f64,
    /// Root Mean Squared Error.
    pub rmse: f64,
}

/// Evaluate a fitted model against held-out data.
///
/// Walks `eval` in chronological order: at each step the model
/// forecasts one point, the residual against the actual value is
/// collected, and the actual value is fed back via
/// [`Forecaster::advance`] so the next forecast starts one tick later.
/// The whole series is consumed; the model's anchor ends past the last
/// evaluated point.
pub fn evaluate<F: Forecaster>(model: &mut F, eval: &Series) -> Result<EvaluationMetrics> {
    if eval.is_empty() {
        return Err(ForecastError::EmptySeries);
    }

    let mut predicted = Vec::with_capacity(eval.len());
    for &actual in eval.values() {
        let forecast = model.forecast(1)?;
        predicted.push(forecast.point()[0]);
        model.advance(actual);
    }

    let metrics = calculate_metrics(eval.values(), &predicted)?;
    Ok(EvaluationMetrics {
        mae: metrics.mae,
        rmse: metrics.rmse,
    })
}
