//! Forecast result structure for holding predictions.

/// A forecast: point predictions with symmetric confidence bounds.
///
/// All three vectors have the same length (the horizon). Bounds are
/// stored raw; clamping negative lower bounds for count-like series is
/// a render-time policy applied by the reporter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Forecast {
    /// Create a forecast from point predictions and interval bounds.
    pub fn with_intervals(point: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert_eq!(point.len(), lower.len());
        debug_assert_eq!(point.len(), upper.len());
        Self { point, lower, upper }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower confidence bounds (unclamped).
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper confidence bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }
}
