use std::path::PathBuf;

use chrono::Duration;

pub const HISTORICAL_API_URL: &str = "https://api.jolpi.ca/ergast/f1";
pub const LIVE_API_URL: &str = "https://api.openf1.org/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub historical_api_url: String,
    pub live_api_url: String,
    pub historical_cache_ttl: Duration,
    pub live_cache_ttl: Duration,
    pub season_data_path: PathBuf,
    pub season: String,
    pub bind_addr: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            historical_api_url: HISTORICAL_API_URL.to_string(),
            live_api_url: LIVE_API_URL.to_string(),
            historical_cache_ttl: Duration::minutes(30),
            live_cache_ttl: Duration::minutes(5),
            season_data_path: PathBuf::from("data/2024_data.json"),
            season: "2024".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

fn env_secs_or(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(Duration::seconds)
        .unwrap_or(default)
}

impl Config {
    pub fn init() -> Self {
        let defaults = Config::default();
        Config {
            historical_api_url: env_or("HISTORICAL_API_URL", defaults.historical_api_url),
            live_api_url: env_or("LIVE_API_URL", defaults.live_api_url),
            historical_cache_ttl: env_secs_or("HISTORICAL_CACHE_TTL_SECS", defaults.historical_cache_ttl),
            live_cache_ttl: env_secs_or("LIVE_CACHE_TTL_SECS", defaults.live_cache_ttl),
            season_data_path: std::env::var("SEASON_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.season_data_path),
            season: env_or("SEASON", defaults.season),
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            log_level: env_or("LOG_LEVEL", defaults.log_level).to_lowercase(),
        }
    }
}
