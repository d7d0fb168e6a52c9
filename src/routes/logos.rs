use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::chart::raster::svg_to_png;
use crate::error::ApiError;
use crate::models::LogoTheme;
use crate::routes::AppState;
use crate::teams;

/// Longer side of the rendered logo in pixels
pub const LOGO_SIZE: u32 = 512;

// GET /api/nba/images/logos/team/:theme/:abbreviation - Team logo as PNG
pub async fn get_team_logo(
    State(state): State<AppState>,
    Path((theme, abbreviation)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let theme = LogoTheme::parse(&theme)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown logo theme {theme:?}")))?;
    let team = teams::find_by_abbreviation(&abbreviation)
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    let svg = state.stats.team_logo_svg(team.id, theme).await?;

    let png = tokio::task::spawn_blocking(move || svg_to_png(&svg, LOGO_SIZE))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
