//! Historical match record, the unit of ingestion and storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single historical match result.
///
/// Records are created during ingestion and immutable afterwards; the
/// record store owns the persisted copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Match date.
    pub date: NaiveDate,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Goals scored by the home team.
    pub home_goals: u32,
    /// Goals scored by the away team.
    pub away_goals: u32,
}

impl MatchRecord {
    pub fn new(
        date: NaiveDate,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        Self {
            date,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
        }
    }

    /// Total goals scored in the match, the default forecast target.
    pub fn total_goals(&self) -> f64 {
        f64::from(self.home_goals + self.away_goals)
    }
}
