//! Singular Spectrum Analysis forecasting model.
//!
//! SSA embeds the recent tail of a series into a trajectory matrix of
//! lagged windows, eigendecomposes the lag-covariance matrix, and
//! keeps the leading components as the signal subspace. Forecasting
//! applies the linear recurrence implied by that subspace; confidence
//! bounds scale the in-sample residual sigma by the normal quantile of
//! the configured confidence level.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats::quantile_normal;
use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};

/// Fraction of eigenvalue energy the signal subspace must cover.
const ENERGY_THRESHOLD: f64 = 0.999;

/// SSA model parameters, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SsaParams {
    /// Sliding-window (embedding) length.
    pub window_size: usize,
    /// Number of recent points the model keeps as its working series.
    pub series_length: usize,
    /// Number of leading training points used for fitting.
    pub train_size: usize,
    /// Default number of future steps per forecast.
    pub horizon: usize,
    /// Confidence level for interval bounds, in (0, 1).
    pub confidence_level: f64,
}

impl SsaParams {
    /// Create a validated parameter set.
    ///
    /// Requires `train_size >= series_length >= window_size >= 2`,
    /// `horizon > 0` and `confidence_level` in (0, 1).
    pub fn new(
        window_size: usize,
        series_length: usize,
        train_size: usize,
        horizon: usize,
        confidence_level: f64,
    ) -> Result<Self> {
        if window_size < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "window_size must be at least 2, got {window_size}"
            )));
        }
        if series_length < window_size {
            return Err(ForecastError::InvalidParameter(format!(
                "series_length ({series_length}) must be >= window_size ({window_size})"
            )));
        }
        if train_size < series_length {
            return Err(ForecastError::InvalidParameter(format!(
                "train_size ({train_size}) must be >= series_length ({series_length})"
            )));
        }
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be positive".to_string(),
            ));
        }
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence_level must be in (0, 1), got {confidence_level}"
            )));
        }
        Ok(Self {
            window_size,
            series_length,
            train_size,
            horizon,
            confidence_level,
        })
    }
}

/// Serialized model state, the checkpoint payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SsaState {
    params: SsaParams,
    lrf: Vec<f64>,
    sigma: f64,
    rank: usize,
    buffer: Vec<f64>,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
}

/// A fitted SSA forecasting model.
///
/// Created by [`Ssa::fit`] or [`Ssa::restore`]. The model carries a
/// rolling buffer of the most recent `series_length` values (the
/// anchor); [`Forecaster::advance`] slides it forward one observation
/// at a time.
#[derive(Debug, Clone)]
pub struct Ssa {
    params: SsaParams,
    /// Linear recurrence coefficients; `lrf[k]` multiplies the value
    /// at offset `k` within the last `window_size - 1` buffer values.
    lrf: Vec<f64>,
    /// In-sample residual standard deviation.
    sigma: f64,
    /// Retained signal-subspace rank.
    rank: usize,
    /// Most recent values, capped at `series_length`.
    buffer: Vec<f64>,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
}

impl Ssa {
    /// Fit an SSA model on a training series.
    ///
    /// Uses the first `train_size` values of `train`, embedding the
    /// last `series_length` of those with a window of `window_size`.
    /// Deterministic for a given series and parameter set.
    pub fn fit(train: &Series, params: SsaParams) -> Result<Self> {
        Self::fit_values(train.values(), params)
    }

    /// Fit from raw values (same contract as [`Ssa::fit`]).
    pub fn fit_values(values: &[f64], params: SsaParams) -> Result<Self> {
        if values.len() < params.train_size {
            return Err(ForecastError::InsufficientData {
                needed: params.train_size,
                got: values.len(),
            });
        }

        let train = &values[..params.train_size];
        let working = &train[params.train_size - params.series_length..];

        let l = params.window_size;
        let n = params.series_length;
        let k = n - l + 1;

        // Trajectory matrix: column j is the window starting at j.
        let trajectory = DMatrix::from_fn(l, k, |i, j| working[j + i]);

        // Lag-covariance matrix (no centering, per Basic SSA).
        let covariance = &trajectory * trajectory.transpose() / k as f64;
        let eigen = SymmetricEigen::new(covariance);

        // Order eigenpairs by descending eigenvalue; the index
        // tiebreak keeps the ordering total and reproducible.
        let mut order: Vec<usize> = (0..l).collect();
        order.sort_by(|&a, &b| {
            eigen.eigenvalues[b]
                .partial_cmp(&eigen.eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        let total_energy: f64 = eigen.eigenvalues.iter().map(|ev| ev.max(0.0)).sum();
        let mut rank = if total_energy <= f64::EPSILON {
            // Zero-energy series: no signal subspace, forecasts are 0.
            0
        } else {
            let mut cumulative = 0.0;
            let mut rank = 0;
            for &idx in &order {
                cumulative += eigen.eigenvalues[idx].max(0.0);
                rank += 1;
                if cumulative / total_energy >= ENERGY_THRESHOLD {
                    break;
                }
            }
            // The recurrence needs the subspace non-vertical.
            rank.min(l - 1)
        };

        // Recurrence coefficients from the signal eigenvectors: with
        // pi the last eigenvector coordinate and nu2 the verticality
        // coefficient, lrf = sum(pi_i * head(v_i)) / (1 - nu2). A
        // near-vertical subspace leaves the recurrence undefined, so
        // the rank degrades until the verticality is tolerable.
        let mut lrf = vec![0.0; l - 1];
        while rank > 0 {
            let nu2: f64 = order
                .iter()
                .take(rank)
                .map(|&idx| {
                    let pi = eigen.eigenvectors[(l - 1, idx)];
                    pi * pi
                })
                .sum();
            if 1.0 - nu2 <= 1e-10 {
                rank -= 1;
                continue;
            }
            for &idx in order.iter().take(rank) {
                let v = eigen.eigenvectors.column(idx);
                let pi = v[l - 1];
                for row in 0..l - 1 {
                    lrf[row] += pi * v[row] / (1.0 - nu2);
                }
            }
            break;
        }

        // Rank-reduced reconstruction via diagonal averaging of the
        // projected trajectory matrix; residuals drive the interval
        // width.
        let reconstructed = if rank == 0 {
            vec![0.0; n]
        } else {
            let mut projected = DMatrix::zeros(l, k);
            for &idx in order.iter().take(rank) {
                let v = eigen.eigenvectors.column(idx);
                let weights = v.transpose() * &trajectory;
                projected += v * weights;
            }
            diagonal_average(&projected)
        };

        let residuals: Vec<f64> = working
            .iter()
            .zip(reconstructed.iter())
            .map(|(actual, fitted)| actual - fitted)
            .collect();
        let sigma = (residuals.iter().map(|r| r * r).sum::<f64>() / n as f64).sqrt();

        Ok(Self {
            params,
            lrf,
            sigma,
            rank,
            buffer: working.to_vec(),
            fitted: reconstructed,
            residuals,
        })
    }

    /// Model parameters.
    pub fn params(&self) -> SsaParams {
        self.params
    }

    /// Retained signal-subspace rank.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// In-sample residual standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Fitted (reconstructed) values over the working window.
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    /// In-sample residuals (actual - fitted).
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Forecast the configured default horizon.
    pub fn forecast_horizon(&self) -> Result<Forecast> {
        self.forecast(self.params.horizon)
    }

    /// Serialize the full model state into a checkpoint blob.
    ///
    /// The blob captures parameters, recurrence coefficients and the
    /// current anchor buffer, so [`Ssa::restore`] resumes forecasting
    /// without a re-fit.
    pub fn checkpoint(&self) -> Result<Vec<u8>> {
        let state = SsaState {
            params: self.params,
            lrf: self.lrf.clone(),
            sigma: self.sigma,
            rank: self.rank,
            buffer: self.buffer.clone(),
            fitted: self.fitted.clone(),
            residuals: self.residuals.clone(),
        };
        bincode::serialize(&state)
            .map_err(|e| ForecastError::Storage(format!("checkpoint encode failed: {e}")))
    }

    /// Restore a model from a checkpoint blob.
    ///
    /// Fails with `CorruptCheckpoint` on decode errors or internally
    /// inconsistent state; a restored model is never partially
    /// populated.
    pub fn restore(blob: &[u8]) -> Result<Self> {
        let state: SsaState = bincode::deserialize(blob)
            .map_err(|e| ForecastError::CorruptCheckpoint(e.to_string()))?;

        let params = state.params;
        SsaParams::new(
            params.window_size,
            params.series_length,
            params.train_size,
            params.horizon,
            params.confidence_level,
        )
        .map_err(|e| ForecastError::CorruptCheckpoint(e.to_string()))?;

        if state.lrf.len() != params.window_size - 1 {
            return Err(ForecastError::CorruptCheckpoint(format!(
                "recurrence length {} does not match window_size {}",
                state.lrf.len(),
                params.window_size
            )));
        }
        if state.buffer.len() < params.window_size - 1
            || state.buffer.len() > params.series_length
        {
            return Err(ForecastError::CorruptCheckpoint(format!(
                "anchor buffer length {} out of range",
                state.buffer.len()
            )));
        }
        if !state.sigma.is_finite() || state.sigma < 0.0 {
            return Err(ForecastError::CorruptCheckpoint(
                "residual sigma is not a non-negative finite number".to_string(),
            ));
        }

        Ok(Self {
            params,
            lrf: state.lrf,
            sigma: state.sigma,
            rank: state.rank,
            buffer: state.buffer,
            fitted: state.fitted,
            residuals: state.residuals,
        })
    }
}

impl Forecaster for Ssa {
    fn forecast(&self, steps: usize) -> Result<Forecast> {
        if steps == 0 {
            return Ok(Forecast::default());
        }

        let lag = self.params.window_size - 1;
        let z = quantile_normal((1.0 + self.params.confidence_level) / 2.0);

        let mut extended = self.buffer.clone();
        let mut point = Vec::with_capacity(steps);
        let mut lower = Vec::with_capacity(steps);
        let mut upper = Vec::with_capacity(steps);

        for h in 1..=steps {
            let tail = &extended[extended.len() - lag..];
            let next: f64 = self.lrf.iter().zip(tail.iter()).map(|(c, v)| c * v).sum();
            extended.push(next);

            // Uncertainty grows with the step count, as each step
            // compounds the one-step residual error.
            let se = self.sigma * (h as f64).sqrt();
            point.push(next);
            lower.push(next - z * se);
            upper.push(next + z * se);
        }

        Ok(Forecast::with_intervals(point, lower, upper))
    }

    fn advance(&mut self, actual: f64) {
        self.buffer.push(actual);
        if self.buffer.len() > self.params.series_length {
            self.buffer.remove(0);
        }
    }

    fn horizon(&self) -> usize {
        self.params.horizon
    }

    fn name(&self) -> &str {
        "SSA"
    }
}

/// Diagonal (anti-diagonal) averaging of a trajectory matrix back
/// into a series of length `rows + cols - 1`.
fn diagonal_average(matrix: &DMatrix<f64>) -> Vec<f64> {
    let (rows, cols) = matrix.shape();
    let n = rows + cols - 1;
    let mut sums = vec![0.0; n];
    let mut counts = vec![0usize; n];
    for i in 0..rows {
        for j in 0..cols {
            sums[i + j] += matrix[(i, j)];
            counts[i + j] += 1;
        }
    }
    sums.iter()
        .zip(counts.iter())
        .map(|(s, c)| s / *c as f64)
        .collect()
}
