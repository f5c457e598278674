use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use packwise::api::AppState;
use packwise::assistant::OpenAiClient;
use packwise::cache::PersistentCache;
use packwise::config::{PackwiseConfig, WeatherMode};
use packwise::planner::PackingPlanner;
use packwise::storage::{ListStore, MemoryStore};
use packwise::weather::{OpenMeteoClient, WeatherProvider};
use packwise::{logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = PackwiseConfig::load()?;
    logging::init(&config.logging)?;
    info!("Starting packwise {}", packwise::VERSION);

    let cache = match config.storage_path().and_then(PersistentCache::open) {
        Ok(cache) => Some(cache),
        Err(e) => {
            warn!("Persistent storage unavailable, saved lists will not survive a restart: {:#}", e);
            None
        }
    };
    let store: Arc<dyn ListStore> = match &cache {
        Some(cache) => Arc::new(cache.clone()),
        None => Arc::new(MemoryStore::new()),
    };

    let mut planner = PackingPlanner::new(store);

    if config.weather.mode == WeatherMode::Live {
        let provider: Arc<dyn WeatherProvider> = Arc::new(OpenMeteoClient::new(config.weather.clone(), cache)?);
        planner = planner.with_weather(WeatherMode::Live, Some(provider));
    } else {
        planner = planner.with_weather(config.weather.mode, None);
    }

    if config.assistant_enabled() {
        let client = OpenAiClient::new(&config.assistant)?;
        planner = planner.with_assistant(
            Arc::new(client),
            config.assistant.packing_temperature,
            config.assistant.flight_temperature,
        );
        info!(model = %config.assistant.model, "Packing assistant enabled");
    }

    web::run(&config.server, AppState::new(planner)).await
}
