use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{GamesResponse, combine_home_away};
use crate::routes::AppState;

/// Query parameters for the games listing
#[derive(Deserialize)]
pub struct GamesQuery {
    /// Merge the two team rows of each game into one home/away entry
    #[serde(default)]
    combine: bool,
}

// GET /api/nba/games/:date - All games on a date (MM-DD-YYYY)
// Query params: combine=true to group rows per game
pub async fn get_games_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(params): Query<GamesQuery>,
) -> Result<Response, ApiError> {
    let day = NaiveDate::parse_from_str(&date, "%m-%d-%Y")
        .map_err(|_| ApiError::InvalidDate(date.clone()))?;

    let rows = state.stats.games_on(day).await?;
    tracing::info!("Found {} team rows for {}", rows.len(), day);

    if params.combine {
        let games = combine_home_away(rows);
        return Ok(Json(GamesResponse { games }).into_response());
    }

    Ok(Json(GamesResponse { games: rows }).into_response())
}
