//! Trip planning service
//!
//! Wires the local packing engine to its optional collaborators (weather,
//! assistant, list storage). Collaborator failures never fail a plan: they are
//! logged, reported as notices, and the local engine's answer is used.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use crate::PackwiseError;
use crate::assistant::{self, CompletionClient};
use crate::config::WeatherMode;
use crate::flight::{self, FlightEstimate, FlightQuery};
use crate::models::{PackingList, TripRequest, TripSummary};
use crate::packing;
use crate::storage::{self, ListStore};
use crate::weather::{self, WeatherProvider};

/// Who produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    Assistant,
}

/// A generated packing list and how it came about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub list: PackingList,
    pub source: Source,
    /// Fallbacks taken while planning
    pub notices: Vec<String>,
}

/// A flight estimate and how it came about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOutcome {
    pub estimate: FlightEstimate,
    pub source: Source,
    pub notices: Vec<String>,
}

/// Options for a single plan
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Ask the assistant for a tailored list
    pub enhance: bool,
    /// Persist the result under this key
    pub save_as: Option<String>,
}

pub struct PackingPlanner {
    store: Arc<dyn ListStore>,
    /// Serializes read-modify-write cycles on each saved list
    list_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    weather: Option<Arc<dyn WeatherProvider>>,
    weather_mode: WeatherMode,
    assistant: Option<Arc<dyn CompletionClient>>,
    packing_temperature: f32,
    flight_temperature: f32,
}

impl PackingPlanner {
    /// A planner using only the local engine
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store,
            list_locks: Mutex::new(HashMap::new()),
            weather: None,
            weather_mode: WeatherMode::Off,
            assistant: None,
            packing_temperature: 0.5,
            flight_temperature: 0.3,
        }
    }

    /// Set where destination temperatures come from.
    ///
    /// `provider` is only consulted in [`WeatherMode::Live`].
    #[must_use]
    pub fn with_weather(mut self, mode: WeatherMode, provider: Option<Arc<dyn WeatherProvider>>) -> Self {
        self.weather_mode = mode;
        self.weather = provider;
        self
    }

    #[must_use]
    pub fn with_assistant(
        mut self,
        client: Arc<dyn CompletionClient>,
        packing_temperature: f32,
        flight_temperature: f32,
    ) -> Self {
        self.assistant = Some(client);
        self.packing_temperature = packing_temperature;
        self.flight_temperature = flight_temperature;
        self
    }

    #[must_use]
    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }

    /// Produce a packing list for `request`.
    ///
    /// Fails with [`PackwiseError::Validation`] while the request is not
    /// ready or the save key is unusable, and with a storage error if saving
    /// was requested and failed.
    #[instrument(skip(self), fields(destination = %request.destination))]
    pub async fn plan(&self, mut request: TripRequest, options: PlanOptions) -> Result<PlanOutcome> {
        if !request.is_ready() {
            return Err(PackwiseError::validation(
                "A destination and a trip duration of at least one day are required",
            )
            .into());
        }
        if let Some(key) = options.save_as.as_deref() {
            storage::validate_list_key(key)?;
        }

        let mut notices = Vec::new();
        if request.measured_temp_celsius.is_none() {
            request.measured_temp_celsius = self.resolve_temperature(&request.destination, &mut notices).await;
        }

        let local = packing::generate(&request)
            .ok_or_else(|| PackwiseError::general("Local engine rejected a ready request"))?;

        let enhanced = if options.enhance {
            self.enhance(&local.generated_for, &mut notices).await
        } else {
            None
        };
        let (list, source) = match enhanced {
            Some(list) => (list, Source::Assistant),
            None => (local, Source::Local),
        };

        if let Some(key) = options.save_as.as_deref() {
            let lock = self.list_lock(key)?;
            let _guard = lock.lock().await;
            storage::save_list(self.store.as_ref(), key, &list)
                .await
                .map_err(|e| PackwiseError::storage(format!("Failed to save list '{key}': {e}")))?;
        }

        info!(
            climate = %list.generated_for.climate,
            items = list.total_items(),
            ?source,
            "Planned packing list"
        );
        Ok(PlanOutcome { list, source, notices })
    }

    async fn resolve_temperature(&self, destination: &str, notices: &mut Vec<String>) -> Option<f64> {
        match self.weather_mode {
            WeatherMode::Off => None,
            WeatherMode::Simulated => {
                let reading = weather::simulate_weather(destination);
                debug!(temperature = reading.temperature, condition = %reading.condition, "Using simulated weather");
                Some(reading.temperature)
            }
            WeatherMode::Live => {
                let Some(provider) = &self.weather else {
                    notices.push("Live weather is not available; classified from the destination name.".to_string());
                    return None;
                };
                match live_temperature(provider.as_ref(), destination).await {
                    Ok(celsius) => Some(celsius),
                    Err(e) => {
                        warn!("Weather lookup for '{}' failed: {}", destination, e);
                        notices.push(format!(
                            "Current weather for {destination} is unavailable; classified from the destination name."
                        ));
                        None
                    }
                }
            }
        }
    }

    async fn enhance(&self, trip: &TripSummary, notices: &mut Vec<String>) -> Option<PackingList> {
        let Some(client) = &self.assistant else {
            notices.push("The packing assistant is not configured; showing the standard list.".to_string());
            return None;
        };

        let prompt = assistant::packing_prompt(&trip.destination, trip.duration_days, trip.climate.display_name());
        let reply = match client.complete(&prompt, self.packing_temperature).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                notices.push("The packing assistant is unavailable; showing the standard list.".to_string());
                return None;
            }
        };

        match assistant::parse_packing_reply(&reply, trip.clone()) {
            Ok(list) => Some(list),
            Err(e) => {
                warn!("Assistant reply unusable: {}", e);
                notices.push("The packing assistant returned an unusable list; showing the standard list.".to_string());
                None
            }
        }
    }

    fn list_lock(&self, key: &str) -> Result<Arc<AsyncMutex<()>>> {
        let mut locks = self
            .list_locks
            .lock()
            .map_err(|_| anyhow!("List lock table poisoned"))?;
        Ok(locks.entry(key.to_string()).or_default().clone())
    }

    /// Load a saved list
    pub async fn load(&self, key: &str) -> Result<Option<PackingList>> {
        storage::load_list(self.store.as_ref(), key).await
    }

    /// Flip one item of a saved list and persist the result.
    ///
    /// `None` when no list is saved under `key`; a missing category or item
    /// returns the stored list unchanged.
    pub async fn toggle(&self, key: &str, category: &str, item: &str) -> Result<Option<PackingList>> {
        let lock = self.list_lock(key)?;
        let _guard = lock.lock().await;

        let Some(mut list) = self.load(key).await? else {
            return Ok(None);
        };

        if list.toggle(category, item) {
            storage::save_list(self.store.as_ref(), key, &list).await?;
        } else {
            debug!(key, category, item, "Toggle target not found");
        }
        Ok(Some(list))
    }

    /// Destination suggestions; empty when unavailable
    pub async fn suggest(&self, query: &str) -> Vec<String> {
        let Some(provider) = &self.weather else {
            return Vec::new();
        };
        provider.autocomplete(query).await.unwrap_or_else(|e| {
            warn!("Autocomplete for '{}' failed: {}", query, e);
            Vec::new()
        })
    }

    /// Flight price estimate, from the assistant when configured
    #[instrument(skip(self))]
    pub async fn estimate_flight(&self, query: &FlightQuery, today: NaiveDate) -> Result<FlightOutcome> {
        query.validate()?;

        let mut notices = Vec::new();
        if let Some(client) = &self.assistant {
            match flight::estimate_with_assistant(client.as_ref(), query, self.flight_temperature).await {
                Ok(estimate) => {
                    return Ok(FlightOutcome {
                        estimate,
                        source: Source::Assistant,
                        notices,
                    });
                }
                Err(e) => {
                    warn!("Assistant flight estimate failed: {}", e);
                    notices.push("The assistant estimate is unavailable; showing a simulated estimate.".to_string());
                }
            }
        }

        Ok(FlightOutcome {
            estimate: flight::simulate_flight_price(&query.from, &query.to, query.date, today),
            source: Source::Local,
            notices,
        })
    }
}

async fn live_temperature(provider: &dyn WeatherProvider, destination: &str) -> Result<f64> {
    let location = provider.geocode(destination).await?;
    provider.current_temperature(location.latitude, location.longitude).await
}
