use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One field goal attempt as reported by the shot chart endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    /// 1/10 ft from the hoop, positive toward the baseline's right side
    pub loc_x: i32,
    pub loc_y: i32,
    /// 1 made, 0 missed
    pub shot_made_flag: i64,
}

/// Static franchise info
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Team {
    pub id: i64,
    pub full_name: &'static str,
    pub abbreviation: &'static str,
    pub nickname: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub year_founded: i32,
}

/// LeagueGameFinder row keyed by upstream column header
pub type GameRow = Map<String, Value>;

/// Both team rows of a single game
#[derive(Debug, Serialize, PartialEq)]
pub struct CombinedGame {
    pub game_id: String,
    pub game_date: Option<String>,
    pub home: Option<GameRow>,
    pub away: Option<GameRow>,
}

/// Response wrapper for the games endpoint
#[derive(Debug, Serialize)]
pub struct GamesResponse<T> {
    pub games: Vec<T>,
}

/// Query parameters identifying one shot chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotChartRequest {
    pub player_id: String,
    pub game_id: String,
    pub team_id: String,
    pub season_type: String,
}

impl ShotChartRequest {
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}_shot_chart.png",
            self.game_id, self.team_id, self.player_id
        )
    }
}

/// Logo variant for light or dark backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoTheme {
    Light,
    Dark,
}

impl LogoTheme {
    pub fn parse(theme: &str) -> Option<Self> {
        match theme.to_ascii_lowercase().as_str() {
            "light" => Some(LogoTheme::Light),
            "dark" => Some(LogoTheme::Dark),
            _ => None,
        }
    }

    /// Path segment used by the logo CDN
    pub fn code(self) -> &'static str {
        match self {
            LogoTheme::Light => "L",
            LogoTheme::Dark => "D",
        }
    }
}

/// stats.nba.com response envelope
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets")]
    pub result_sets: Vec<ResultSet>,
}

/// One named table: column headers plus rows of raw values
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Rows as header -> value objects
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.row_set
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

fn matchup(row: &GameRow) -> &str {
    row.get("MATCHUP").and_then(Value::as_str).unwrap_or_default()
}

/// Pair team rows into games. A `vs.` matchup is the home side, `@` the away side.
/// Games keep the order in which they first appear.
pub fn combine_home_away(rows: Vec<GameRow>) -> Vec<CombinedGame> {
    let mut games: Vec<CombinedGame> = Vec::new();

    for row in rows {
        let Some(game_id) = row.get("GAME_ID").and_then(Value::as_str).map(str::to_string) else {
            tracing::warn!("Skipping game row without GAME_ID");
            continue;
        };

        let index = match games.iter().position(|g| g.game_id == game_id) {
            Some(i) => i,
            None => {
                games.push(CombinedGame {
                    game_id,
                    game_date: row
                        .get("GAME_DATE")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    home: None,
                    away: None,
                });
                games.len() - 1
            }
        };

        let game = &mut games[index];
        if matchup(&row).contains(" @ ") {
            game.away = Some(row);
        } else if matchup(&row).contains(" vs. ") {
            game.home = Some(row);
        } else {
            tracing::warn!("Unrecognized matchup for game {}: {:?}", game.game_id, matchup(&row));
        }
    }

    games
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(game_id: &str, team: &str, matchup: &str) -> GameRow {
        json!({
            "GAME_ID": game_id,
            "GAME_DATE": "2023-11-17",
            "TEAM_ABBREVIATION": team,
            "MATCHUP": matchup,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn file_name_follows_game_team_player_order() {
        let req = ShotChartRequest {
            player_id: "203076".to_string(),
            game_id: "0042200233".to_string(),
            team_id: "1610612747".to_string(),
            season_type: "Playoffs".to_string(),
        };
        assert_eq!(req.file_name(), "0042200233_1610612747_203076_shot_chart.png");
    }

    #[test]
    fn logo_themes() {
        assert_eq!(LogoTheme::parse("Dark"), Some(LogoTheme::Dark));
        assert_eq!(LogoTheme::parse("light").map(LogoTheme::code), Some("L"));
        assert_eq!(LogoTheme::parse("sepia"), None);
    }

    #[test]
    fn records_zip_headers_and_rows() {
        let set: ResultSet = serde_json::from_value(json!({
            "name": "LeagueGameFinderResults",
            "headers": ["GAME_ID", "PTS"],
            "rowSet": [["0022300001", 110], ["0022300002", 98]]
        }))
        .unwrap();

        let records = set.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["PTS"], json!(98));
        assert_eq!(set.column("PTS"), Some(1));
        assert_eq!(set.column("WL"), None);
    }

    #[test]
    fn combines_home_and_away() {
        let rows = vec![
            row("001", "LAL", "LAL @ BOS"),
            row("002", "DEN", "DEN vs. PHX"),
            row("001", "BOS", "BOS vs. LAL"),
            row("002", "PHX", "PHX @ DEN"),
        ];

        let games = combine_home_away(rows);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id, "001");
        assert_eq!(games[0].game_date.as_deref(), Some("2023-11-17"));
        assert_eq!(games[0].home.as_ref().unwrap()["TEAM_ABBREVIATION"], "BOS");
        assert_eq!(games[0].away.as_ref().unwrap()["TEAM_ABBREVIATION"], "LAL");
        assert_eq!(games[1].home.as_ref().unwrap()["TEAM_ABBREVIATION"], "DEN");
    }

    #[test]
    fn lone_rows_keep_an_empty_side() {
        let games = combine_home_away(vec![row("003", "MIA", "MIA vs. NYK")]);
        assert!(games[0].home.is_some());
        assert!(games[0].away.is_none());
    }
}
