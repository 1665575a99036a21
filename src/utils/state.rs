use std::sync::Arc;

use reqwest::Client;

use crate::analytics::SeasonAnalytics;
use crate::chat::ChatInterpreter;
use crate::clients::{HistoricalClient, LiveClient};
use crate::models::{dataset::SeasonDataset, error::Result};
use crate::utils::{config::Config, roster::Roster};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub historical: HistoricalClient,
    pub live: LiveClient,
    pub analytics: Arc<SeasonAnalytics>,
    pub chat: ChatInterpreter,
}

impl AppState {
    /// Loads the season dataset from the configured path.
    pub fn init(config: Config) -> Result<Self> {
        let dataset = SeasonDataset::from_path(&config.season_data_path)?;
        Ok(Self::with_dataset(config, dataset))
    }

    pub fn with_dataset(config: Config, dataset: SeasonDataset) -> Self {
        let http_client = Client::new();
        let historical = HistoricalClient::new(
            http_client.clone(),
            config.historical_api_url.clone(),
            config.historical_cache_ttl,
        );
        let live = LiveClient::new(http_client, config.live_api_url.clone(), config.live_cache_ttl);
        let analytics = Arc::new(SeasonAnalytics::new(
            dataset,
            config.season.clone(),
            Roster::season_2024(),
        ));

        AppState {
            chat: ChatInterpreter::new(live.clone()),
            config,
            historical,
            live,
            analytics,
        }
    }
}
