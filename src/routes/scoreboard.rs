use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::error::ApiError;
use crate::routes::AppState;

// GET /api/nba/todays_scoreboard - Live scoreboard, passed through as-is
pub async fn get_todays_scoreboard(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let scoreboard = state.stats.todays_scoreboard().await?;
    Ok(Json(scoreboard))
}
