//! Univariate time series keyed by date.

use crate::core::MatchRecord;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// An ordered univariate time series.
///
/// Dates are strictly ascending. A series is derived from stored
/// records on each load and never persisted itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Series {
    /// Create a series from parallel date/value vectors.
    ///
    /// Fails if the vectors differ in length or the dates are not
    /// strictly increasing.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "dates and values differ in length: {} vs {}",
                dates.len(),
                values.len()
            )));
        }
        for i in 1..dates.len() {
            if dates[i] <= dates[i - 1] {
                return Err(ForecastError::InvalidParameter(
                    "dates must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { dates, values })
    }

    /// Build a series from match records, ordered chronologically.
    ///
    /// `selector` extracts the numeric value from each record (for
    /// goal counts, [`MatchRecord::total_goals`]). Input dates need
    /// not be unique: same-day records collapse into one point by
    /// summing their values, keeping the series strictly ascending.
    pub fn from_records<F>(records: &[MatchRecord], selector: F) -> Self
    where
        F: Fn(&MatchRecord) -> f64,
    {
        let mut pairs: Vec<(NaiveDate, f64)> =
            records.iter().map(|r| (r.date, selector(r))).collect();
        pairs.sort_by_key(|(date, _)| *date);

        let mut dates = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (date, value) in pairs {
            if dates.last() == Some(&date) {
                *values.last_mut().unwrap() += value;
            } else {
                dates.push(date);
                values.push(value);
            }
        }
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (date, value) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Split at a positional index: `[0, index)` goes to train, the
    /// rest to eval.
    pub fn split_at(&self, index: usize) -> (Series, Series) {
        let index = index.min(self.len());
        let train = Series {
            dates: self.dates[..index].to_vec(),
            values: self.values[..index].to_vec(),
        };
        let eval = Series {
            dates: self.dates[index..].to_vec(),
            values: self.values[index..].to_vec(),
        };
        (train, eval)
    }

    /// Split at a chronological cutoff: points dated before `cutoff`
    /// go to train, the rest to eval. No shuffling, order preserved.
    ///
    /// Fails with `InsufficientData` if the train partition ends up
    /// shorter than `min_train` or the eval partition shorter than
    /// `min_eval`.
    pub fn split_at_date(
        &self,
        cutoff: NaiveDate,
        min_train: usize,
        min_eval: usize,
    ) -> Result<(Series, Series)> {
        let index = self.dates.partition_point(|d| *d < cutoff);
        let (train, eval) = self.split_at(index);
        if train.len() < min_train {
            return Err(ForecastError::InsufficientData {
                needed: min_train,
                got: train.len(),
            });
        }
        if eval.len() < min_eval {
            return Err(ForecastError::InsufficientData {
                needed: min_eval,
                got: eval.len(),
            });
        }
        Ok((train, eval))
    }
}
