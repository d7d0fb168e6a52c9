use axum::{extract::Path, response::Json};

use crate::error::ApiError;
use crate::models::Team;
use crate::teams;

// GET /api/nba/team/:abbreviation - Get team by abbreviation (e.g. LAL)
pub async fn get_team_by_abbreviation(
    Path(abbreviation): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = teams::find_by_abbreviation(&abbreviation)
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    Ok(Json(*team))
}
