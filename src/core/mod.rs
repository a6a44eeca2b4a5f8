//! Core data structures: match records, series, and forecast results.

mod forecast;
mod record;
mod series;

pub use forecast::Forecast;
pub use record::MatchRecord;
pub use series::Series;
