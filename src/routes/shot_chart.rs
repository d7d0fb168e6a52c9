use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::chart::{self, ChartStyle, RenderError};
use crate::error::ApiError;
use crate::models::ShotChartRequest;
use crate::routes::AppState;

const MISSING_PARAMS: &str = "Missing required parameters";

/// Query parameters for a shot chart. Both camelCase and the stats API's
/// snake_case names are accepted.
#[derive(Deserialize)]
pub struct ShotChartQuery {
    #[serde(rename = "playerId", alias = "player_id", default)]
    player_id: Option<String>,
    #[serde(rename = "gameId", alias = "game_id_nullable", alias = "game_id", default)]
    game_id: Option<String>,
    #[serde(rename = "teamId", alias = "team_id", default)]
    team_id: Option<String>,
    #[serde(rename = "seasonType", alias = "season_type_all_star", alias = "season_type", default)]
    season_type: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Ids end up in a file name, so only plain tokens are allowed.
fn is_plain_id(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl ShotChartQuery {
    fn into_request(self) -> Result<ShotChartRequest, ApiError> {
        let (Some(player_id), Some(game_id), Some(team_id), Some(season_type)) = (
            present(self.player_id),
            present(self.game_id),
            present(self.team_id),
            present(self.season_type),
        ) else {
            return Err(ApiError::BadRequest(MISSING_PARAMS.to_string()));
        };

        for id in [&player_id, &game_id, &team_id] {
            if !is_plain_id(id) {
                return Err(ApiError::BadRequest(format!("Invalid id {id:?}")));
            }
        }

        Ok(ShotChartRequest {
            player_id,
            game_id,
            team_id,
            season_type,
        })
    }
}

// GET /api/nba/shot_chart - Render a player's shot chart for one game
// Saved as {gameId}_{teamId}_{playerId}_shot_chart.png and returned as the body.
// A name sent together with its alias is a duplicate field, which axum's Query
// extractor rejects with its own 400 plain-text message.
pub async fn get_shot_chart(
    State(state): State<AppState>,
    Query(params): Query<ShotChartQuery>,
) -> Result<Response, ApiError> {
    let request = params.into_request()?;

    let shots = state.stats.shot_chart(&request).await?;
    tracing::info!(
        "Rendering shot chart for player {} in game {} ({} shots)",
        request.player_id,
        request.game_id,
        shots.len()
    );

    let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, RenderError> {
        let style = ChartStyle::standard()?;
        chart::render(&shots, &style)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    tokio::fs::create_dir_all(&state.shot_chart_dir).await?;
    let path = state.shot_chart_dir.join(request.file_name());
    tokio::fs::write(&path, &png).await?;
    tracing::debug!("Wrote {}", path.display());

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
