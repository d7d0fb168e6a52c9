use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const STATS_BASE_URL: &str = "https://stats.nba.com/stats";
pub const LIVE_BASE_URL: &str = "https://cdn.nba.com";
pub const LOGO_BASE_URL: &str = "https://cdn.nba.com";
pub const SHOT_CHART_DIR: &str = "shot_charts";

/// stats.nba.com is slow to answer; give it room before giving up.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: Ipv4Addr,
    pub port: u16,
    pub stats_base_url: String,
    pub live_base_url: String,
    pub logo_base_url: String,
    /// Where rendered shot charts are written (SHOT_CHART_DIR)
    pub shot_chart_dir: PathBuf,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let url = |key: &str, default: &str| var(key, default).trim_end_matches('/').to_string();
        let invalid = |key: &'static str, value: String| ConfigError::Invalid { key, value };

        let host = var("HOST", "127.0.0.1");
        let port = var("PORT", "5000");
        let timeout = var("UPSTREAM_TIMEOUT_SECS", &UPSTREAM_TIMEOUT_SECS.to_string());

        Ok(Self {
            host: host.parse().map_err(|_| invalid("HOST", host.clone()))?,
            port: port.parse().map_err(|_| invalid("PORT", port.clone()))?,
            stats_base_url: url("NBA_STATS_BASE_URL", STATS_BASE_URL),
            live_base_url: url("NBA_LIVE_BASE_URL", LIVE_BASE_URL),
            logo_base_url: url("NBA_LOGO_BASE_URL", LOGO_BASE_URL),
            shot_chart_dir: PathBuf::from(var("SHOT_CHART_DIR", SHOT_CHART_DIR)),
            upstream_timeout: Duration::from_secs(
                timeout
                    .parse()
                    .map_err(|_| invalid("UPSTREAM_TIMEOUT_SECS", timeout.clone()))?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, Ipv4Addr::LOCALHOST);
        assert_eq!(config.port, 5000);
        assert_eq!(config.stats_base_url, STATS_BASE_URL);
        assert_eq!(config.shot_chart_dir, PathBuf::from("shot_charts"));
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_and_trailing_slashes() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("NBA_STATS_BASE_URL", "http://localhost:9000/stats/"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.host, Ipv4Addr::UNSPECIFIED);
        assert_eq!(config.port, 8080);
        assert_eq!(config.stats_base_url, "http://localhost:9000/stats");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
