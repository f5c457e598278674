//! Flight price estimates: assistant-backed with a deterministic simulator

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::PackwiseError;
use crate::assistant::{self, CompletionClient};

/// How the price compares to usual fares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceClass {
    Low,
    Medium,
    High,
}

impl PriceClass {
    #[must_use]
    pub fn deal_tip(&self) -> &'static str {
        match self {
            PriceClass::High => {
                "Prices are high for this date. Consider booking immediately or changing your travel dates."
            }
            PriceClass::Medium => {
                "Prices are moderate. They might drop slightly if you wait, but could also increase."
            }
            PriceClass::Low => "Prices are currently low. This is a good time to book.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// Price estimate for one route and date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEstimate {
    pub price_range: PriceRange,
    pub average_price: f64,
    pub best_deal_tip: String,
    pub best_time_to_book: String,
    pub price_class: PriceClass,
}

/// A flight search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
}

impl FlightQuery {
    pub fn validate(&self) -> crate::Result<()> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(PackwiseError::validation("Both origin and destination are required"));
        }
        Ok(())
    }
}

fn booking_factor(days_until_flight: i64) -> f64 {
    match days_until_flight {
        ..7 => 1.7,
        7..14 => 1.4,
        14..30 => 1.2,
        30..90 => 1.0,
        _ => 1.1,
    }
}

fn season_factor(date: NaiveDate) -> f64 {
    match date.month() {
        6..=9 => 1.2,
        12 | 1 => 1.3,
        _ => 1.0,
    }
}

fn weekend_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Fri | Weekday::Sat | Weekday::Sun => 1.15,
        _ => 1.0,
    }
}

fn booking_advice(days_until_flight: i64) -> &'static str {
    match days_until_flight {
        ..7 => "immediately (prices will likely increase further)",
        7..21 => "as soon as possible",
        21..90 => "now (you're in the optimal booking window)",
        _ => "waiting until 2-3 months before departure",
    }
}

/// Deterministic price estimate from the route text and the booking calendar.
///
/// The base fare grows with the distance between the first characters of the
/// two place names; booking window, season and weekday scale it.
#[must_use]
pub fn simulate_flight_price(from: &str, to: &str, date: NaiveDate, today: NaiveDate) -> FlightEstimate {
    let first = |s: &str| s.chars().next().map_or(0, |c| i64::from(u32::from(c)));
    let base = 200.0 + 20.0 * (first(from) - first(to)).abs() as f64;

    let days_until_flight = (date - today).num_days().max(1);
    let booking = booking_factor(days_until_flight);

    let raw = base * booking * season_factor(date) * weekend_factor(date);
    let average = (raw / 10.0).round() * 10.0;

    let price_class = if booking >= 1.4 {
        PriceClass::High
    } else if booking <= 1.0 {
        PriceClass::Low
    } else {
        PriceClass::Medium
    };

    FlightEstimate {
        price_range: PriceRange {
            low: (average * 0.85).round(),
            high: (average * 1.25).round(),
        },
        average_price: average,
        best_deal_tip: price_class.deal_tip().to_string(),
        best_time_to_book: booking_advice(days_until_flight).to_string(),
        price_class,
    }
}

/// Ask the assistant for an estimate and validate its reply
pub async fn estimate_with_assistant(
    client: &dyn CompletionClient,
    query: &FlightQuery,
    temperature: f32,
) -> Result<FlightEstimate> {
    let prompt = assistant::flight_prompt(&query.from, &query.to, query.date);
    let reply = client.complete(&prompt, temperature).await?;
    parse_flight_reply(&reply)
}

pub(crate) fn parse_flight_reply(reply: &str) -> Result<FlightEstimate> {
    let json = assistant::extract_json(reply)
        .ok_or_else(|| PackwiseError::api("Flight estimate reply did not contain a JSON object"))?;
    let estimate: FlightEstimate = serde_json::from_str(json)
        .map_err(|e| PackwiseError::api(format!("Flight estimate reply has an unexpected shape: {e}")))?;

    let range = estimate.price_range;
    if !(range.low > 0.0 && range.low <= range.high) {
        return Err(PackwiseError::api("Flight estimate reply has an implausible price range").into());
    }
    Ok(estimate)
}
