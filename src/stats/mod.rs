//! Access to the remote NBA stats and CDN services.

mod client;

pub use client::NbaStatsClient;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::models::{GameRow, LogoTheme, ShotChartRequest, ShotRecord, StatsResponse};

pub const SHOT_CHART_RESULT_SET: &str = "Shot_Chart_Detail";

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("result set {0} missing from response")]
    MissingResultSet(String),
    #[error("column {0} missing from result set")]
    MissingColumn(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Upstream data the HTTP handlers depend on
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// One row per team per game played on `date`
    async fn games_on(&self, date: NaiveDate) -> Result<Vec<GameRow>, StatsError>;

    async fn shot_chart(&self, request: &ShotChartRequest) -> Result<Vec<ShotRecord>, StatsError>;

    /// Live scoreboard document, passed through untouched
    async fn todays_scoreboard(&self) -> Result<Value, StatsError>;

    /// Raw SVG bytes of a team logo
    async fn team_logo_svg(&self, team_id: i64, theme: LogoTheme) -> Result<Vec<u8>, StatsError>;
}

/// Records of the first result set in a stats.nba.com response
pub fn first_result_records(response: StatsResponse) -> Result<Vec<GameRow>, StatsError> {
    response
        .result_sets
        .first()
        .map(|set| set.records())
        .ok_or_else(|| StatsError::MissingResultSet("at index 0".to_string()))
}

/// Pull shot locations and outcomes out of a shot chart response
pub fn parse_shots(response: StatsResponse) -> Result<Vec<ShotRecord>, StatsError> {
    let set = response
        .result_sets
        .iter()
        .find(|s| s.name == SHOT_CHART_RESULT_SET)
        .ok_or_else(|| StatsError::MissingResultSet(SHOT_CHART_RESULT_SET.to_string()))?;

    let column = |name: &str| {
        set.column(name)
            .ok_or_else(|| StatsError::MissingColumn(name.to_string()))
    };
    let (x_col, y_col, flag_col) = (column("LOC_X")?, column("LOC_Y")?, column("SHOT_MADE_FLAG")?);

    let int_at = |row: &[Value], col: usize| -> Result<i64, StatsError> {
        row.get(col)
            .and_then(Value::as_i64)
            .ok_or_else(|| StatsError::Malformed(format!("non-integer value in column {}", set.headers[col])))
    };

    let coord_at = |row: &[Value], col: usize| -> Result<i32, StatsError> {
        let value = int_at(row, col)?;
        i32::try_from(value).map_err(|_| {
            StatsError::Malformed(format!("{} out of range: {}", set.headers[col], value))
        })
    };

    set.row_set
        .iter()
        .map(|row| {
            Ok(ShotRecord {
                loc_x: coord_at(row, x_col)?,
                loc_y: coord_at(row, y_col)?,
                shot_made_flag: int_at(row, flag_col)?,
            })
        })
        .collect()
}
