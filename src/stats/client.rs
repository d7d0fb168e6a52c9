use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::Client;
use serde_json::Value;

use super::{StatsError, StatsProvider, first_result_records, parse_shots};
use crate::config::Config;
use crate::models::{GameRow, LogoTheme, ShotChartRequest, ShotRecord, StatsResponse};

const SCOREBOARD_PATH: &str = "/static/json/liveData/scoreboard/todaysScoreboard_00.json";

// stats.nba.com rejects requests that do not look like they come from its own site.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
        ),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert(
        HeaderName::from_static("x-nba-stats-origin"),
        HeaderValue::from_static("stats"),
    );
    headers.insert(
        HeaderName::from_static("x-nba-stats-token"),
        HeaderValue::from_static("true"),
    );
    headers
}

pub struct NbaStatsClient {
    client: Client,
    stats_base_url: String,
    live_base_url: String,
    logo_base_url: String,
}

impl NbaStatsClient {
    pub fn new(config: &Config) -> Result<Self, StatsError> {
        let client = Client::builder()
            .default_headers(default_headers())
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            client,
            stats_base_url: config.stats_base_url.clone(),
            live_base_url: config.live_base_url.clone(),
            logo_base_url: config.logo_base_url.clone(),
        })
    }

    async fn stats_endpoint(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<StatsResponse, StatsError> {
        let url = format!("{}/{}", self.stats_base_url, endpoint);
        tracing::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<StatsResponse>().await?)
    }
}

/// LeagueGameFinder filters for every team game on a single day
fn game_finder_params(date: NaiveDate) -> Vec<(&'static str, String)> {
    let day = date.format("%m/%d/%Y").to_string();
    let mut params: Vec<(&'static str, String)> = [
        "Conference", "DraftNumber", "DraftRound", "DraftTeamID", "DraftYear", "EqAST",
        "EqBLK", "EqDD", "EqDREB", "EqFG3A", "EqFG3M", "EqFG3_PCT", "EqFGA", "EqFGM",
        "EqFG_PCT", "EqFTA", "EqFTM", "EqFT_PCT", "EqMINUTES", "EqOREB", "EqPF", "EqPTS",
        "EqREB", "EqSTL", "EqTD", "EqTOV", "GameID", "Location", "Outcome", "PORound",
        "PlayerID", "RookieYear", "Season", "SeasonSegment", "SeasonType", "StarterBench",
        "TeamID", "VsConference", "VsDivision", "VsTeamID", "YearsExperience",
    ]
    .into_iter()
    .map(|key| (key, String::new()))
    .collect();

    params.extend([
        ("DateFrom", day.clone()),
        ("DateTo", day),
        ("LeagueID", "00".to_string()),
        ("PlayerOrTeam", "T".to_string()),
    ]);
    params
}

/// ShotChartDetail filters for one player's attempts in one game
fn shot_chart_params(request: &ShotChartRequest) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = [
        "AheadBehind", "ClutchTime", "ContextFilter", "DateFrom", "DateTo", "EndPeriod",
        "EndRange", "GameSegment", "Location", "Outcome", "PlayerPosition", "PointDiff",
        "Position", "RangeType", "RookieYear", "Season", "SeasonSegment", "StartPeriod",
        "StartRange", "VsConference", "VsDivision",
    ]
    .into_iter()
    .map(|key| (key, String::new()))
    .collect();

    params.extend([
        ("ContextMeasure", "FGA".to_string()),
        ("GameID", request.game_id.clone()),
        ("LastNGames", "0".to_string()),
        ("LeagueID", "00".to_string()),
        ("Month", "0".to_string()),
        ("OpponentTeamID", "0".to_string()),
        ("Period", "0".to_string()),
        ("PlayerID", request.player_id.clone()),
        ("SeasonType", request.season_type.clone()),
        ("TeamID", request.team_id.clone()),
    ]);
    params
}

#[async_trait]
impl StatsProvider for NbaStatsClient {
    async fn games_on(&self, date: NaiveDate) -> Result<Vec<GameRow>, StatsError> {
        let response = self
            .stats_endpoint("leaguegamefinder", &game_finder_params(date))
            .await?;
        first_result_records(response)
    }

    async fn shot_chart(&self, request: &ShotChartRequest) -> Result<Vec<ShotRecord>, StatsError> {
        let response = self
            .stats_endpoint("shotchartdetail", &shot_chart_params(request))
            .await?;
        parse_shots(response)
    }

    async fn todays_scoreboard(&self) -> Result<Value, StatsError> {
        let url = format!("{}{}", self.live_base_url, SCOREBOARD_PATH);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    async fn team_logo_svg(&self, team_id: i64, theme: LogoTheme) -> Result<Vec<u8>, StatsError> {
        let url = format!(
            "{}/logos/nba/{}/primary/{}/logo.svg",
            self.logo_base_url,
            team_id,
            theme.code()
        );
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
