//! CSV ingestion boundary.
//!
//! Source rows look like `1,15/8/2020,TeamA,TeamB,2,1`: a positional
//! index, a `d/m/yyyy` date, both team names and both goal counts, no
//! header line.

use crate::core::MatchRecord;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Policy for malformed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Propagate the first malformed row as an error.
    #[default]
    Abort,
    /// Log and skip malformed rows, keeping the rest.
    Skip,
}

/// Parse match records from a CSV reader.
pub fn ingest_csv<R: Read>(reader: R, policy: RowPolicy) -> Result<Vec<MatchRecord>> {
    // Flexible so a wrong field count reaches parse_row's column
    // check and falls under the row policy instead of failing the
    // reader outright.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let line = i + 1;
        let row = row.map_err(|e| ForecastError::MalformedRecord {
            line,
            reason: e.to_string(),
        })?;
        match parse_row(&row, line) {
            Ok(record) => records.push(record),
            Err(err) => match policy {
                RowPolicy::Abort => return Err(err),
                RowPolicy::Skip => {
                    warn!(line, error = %err, "skipping malformed row");
                }
            },
        }
    }
    Ok(records)
}

/// Parse match records from a CSV file on disk.
pub fn ingest_csv_path(path: impl AsRef<Path>, policy: RowPolicy) -> Result<Vec<MatchRecord>> {
    let file = std::fs::File::open(path)?;
    ingest_csv(file, policy)
}

fn parse_row(row: &csv::StringRecord, line: usize) -> Result<MatchRecord> {
    if row.len() != 6 {
        return Err(ForecastError::MalformedRecord {
            line,
            reason: format!("expected 6 columns, got {}", row.len()),
        });
    }

    let date = NaiveDate::parse_from_str(&row[1], "%d/%m/%Y").map_err(|e| {
        ForecastError::MalformedRecord {
            line,
            reason: format!("unparseable date {:?}: {e}", &row[1]),
        }
    })?;
    let home_goals = parse_goals(&row[4], "home goals", line)?;
    let away_goals = parse_goals(&row[5], "away goals", line)?;

    Ok(MatchRecord::new(
        date,
        &row[2],
        &row[3],
        home_goals,
        away_goals,
    ))
}

fn parse_goals(field: &str, what: &str, line: usize) -> Result<u32> {
    field
        .parse()
        .map_err(|e| ForecastError::MalformedRecord {
            line,
            reason: format!("non-integer {what} {field:?}: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_row_parses() {
        let records = ingest_csv("1,15/8/2020,TeamA,TeamB,2,1".as_bytes(), RowPolicy::Abort)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            MatchRecord::new(
                NaiveDate::from_ymd_opt(2020, 8, 15).unwrap(),
                "TeamA",
                "TeamB",
                2,
                1,
            )
        );
        assert_eq!(records[0].total_goals(), 3.0);
    }

    #[test]
    fn bad_date_aborts() {
        let result = ingest_csv("2,bad-date,TeamA,TeamB,2,1".as_bytes(), RowPolicy::Abort);
        assert!(matches!(
            result,
            Err(ForecastError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn bad_goals_aborts() {
        let result = ingest_csv("1,15/8/2020,TeamA,TeamB,x,1".as_bytes(), RowPolicy::Abort);
        assert!(matches!(
            result,
            Err(ForecastError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn wrong_column_count_aborts() {
        let result = ingest_csv("1,15/8/2020,TeamA".as_bytes(), RowPolicy::Abort);
        assert!(matches!(
            result,
            Err(ForecastError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn skip_policy_skips_wrong_column_count() {
        let input = "1,15/8/2020,TeamA,TeamB,2,1\n2,too,short\n3,16/8/2020,TeamE,TeamF,1,1";
        let records = ingest_csv(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].home_team, "TeamA");
        assert_eq!(records[1].home_team, "TeamE");
    }

    #[test]
    fn skip_policy_keeps_good_rows() {
        let input = "1,15/8/2020,TeamA,TeamB,2,1\n2,bad-date,TeamC,TeamD,0,0\n3,16/8/2020,TeamE,TeamF,1,1";
        let records = ingest_csv(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].home_team, "TeamE");
    }

    #[test]
    fn malformed_error_carries_line_number() {
        let input = "1,15/8/2020,TeamA,TeamB,2,1\n2,bad-date,TeamC,TeamD,0,0";
        let result = ingest_csv(input.as_bytes(), RowPolicy::Abort);
        assert!(matches!(
            result,
            Err(ForecastError::MalformedRecord { line: 2, .. })
        ));
    }
}
