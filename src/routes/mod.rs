use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::stats::StatsProvider;

pub mod games;
pub mod health;
pub mod logos;
pub mod scoreboard;
pub mod shot_chart;
pub mod teams;

#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<dyn StatsProvider>,
    pub shot_chart_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    let nba = Router::new()
        .route("/team/{abbreviation}", get(teams::get_team_by_abbreviation))
        .route("/games/{date}", get(games::get_games_by_date))
        .route("/shot_chart", get(shot_chart::get_shot_chart))
        .route("/todays_scoreboard", get(scoreboard::get_todays_scoreboard))
        .route(
            "/images/logos/team/{theme}/{abbreviation}",
            get(logos::get_team_logo),
        );

    Router::new()
        // Root and health
        .route("/", get(|| async { "NBA Court API - v1.0" }))
        .route("/health", get(health::health_check))
        .nest("/api/nba", nba)
        .with_state(state)
}
