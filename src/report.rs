//! Console-style rendering of forecast output.

use crate::core::{Forecast, Series};

/// Render one text block per forecast step.
///
/// `actuals` supplies the dates (and, where known, the observed
/// values) for the horizon; steps beyond the actuals are rendered
/// without an actual line. Negative lower bounds are clamped to 0 at
/// render time, since goal counts cannot go below zero; the stored
/// forecast keeps the raw bound.
pub fn render(forecast: &Forecast, actuals: &Series) -> Vec<String> {
    let mut blocks = Vec::with_capacity(forecast.horizon());
    for step in 0..forecast.horizon() {
        let mut block = String::new();
        if let Some(date) = actuals.dates().get(step) {
            block.push_str(&format!("Date: {}\n", date.format("%d/%m/%Y")));
        } else {
            block.push_str(&format!("Step: {}\n", step + 1));
        }
        if let Some(actual) = actuals.values().get(step) {
            block.push_str(&format!("Actual Goals: {actual}\n"));
        }
        let lower = forecast.lower()[step].max(0.0);
        block.push_str(&format!("Lower Estimate: {lower:.3}\n"));
        block.push_str(&format!("Forecast: {:.3}\n", forecast.point()[step]));
        block.push_str(&format!("Upper Estimate: {:.3}\n", forecast.upper()[step]));
        blocks.push(block);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn daily_series(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let dates: Vec<_> = (0..values.len())
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        Series::new(dates, values.to_vec()).unwrap()
    }

    #[test]
    fn one_block_per_step_with_dates_and_actuals() {
        let forecast = Forecast::with_intervals(
            vec![2.5, 3.0],
            vec![1.0, 1.5],
            vec![4.0, 4.5],
        );
        let actuals = daily_series(&[3.0, 2.0]);

        let blocks = render(&forecast, &actuals);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Date: 01/01/2021"));
        assert!(blocks[0].contains("Actual Goals: 3"));
        assert!(blocks[0].contains("Lower Estimate: 1.000"));
        assert!(blocks[0].contains("Forecast: 2.500"));
        assert!(blocks[0].contains("Upper Estimate: 4.000"));
        assert!(blocks[1].contains("Date: 02/01/2021"));
    }

    #[test]
    fn negative_lower_bound_clamps_to_zero() {
        let forecast = Forecast::with_intervals(vec![0.5], vec![-1.2], vec![2.2]);
        let actuals = daily_series(&[1.0]);

        let blocks = render(&forecast, &actuals);
        assert!(blocks[0].contains("Lower Estimate: 0.000"));
        // The forecast itself keeps the raw bound.
        assert_eq!(forecast.lower()[0], -1.2);
    }

    #[test]
    fn steps_past_known_actuals_render_without_actual_line() {
        let forecast = Forecast::with_intervals(
            vec![1.0, 2.0, 3.0],
            vec![0.5, 1.5, 2.5],
            vec![1.5, 2.5, 3.5],
        );
        let actuals = daily_series(&[1.0]);

        let blocks = render(&forecast, &actuals);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].contains("Actual Goals"));
        assert!(!blocks[1].contains("Actual Goals"));
        assert!(blocks[2].contains("Step: 3"));
    }
}
