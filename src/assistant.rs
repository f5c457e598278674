//! Chat-completion assistant for packing lists and flight price estimates

use std::sync::LazyLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::PackwiseError;
use crate::config::AssistantConfig;
use crate::http;
use crate::models::{PackingCategory, PackingList, TripSummary};
use crate::packing::normalize_categories;

static API_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sk-[A-Za-z0-9]{32,}$").expect("Invalid API key regex"));

/// Format check only; a well-formed key may still be rejected upstream
#[must_use]
pub fn is_valid_api_key(key: &str) -> bool {
    API_KEY_PATTERN.is_match(key)
}

/// A single-prompt text completion service
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// OpenAI-compatible `/chat/completions` client
pub struct OpenAiClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Build a client; fails when no API key is configured
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| PackwiseError::config("No assistant API key configured"))?;

        Ok(Self {
            client: http::build_client(config.timeout_seconds, 0)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };
        let body = serde_json::to_vec(&request).context("Failed to encode chat request")?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| PackwiseError::api(format!("Assistant request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PackwiseError::api(format!("Failed to read assistant response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| "Failed to fetch from assistant API".to_string());
            return Err(PackwiseError::api(format!("{message} (HTTP {status})")).into());
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).context("Failed to parse assistant response")?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PackwiseError::api("Assistant response contained no content"))?;

        debug!(chars = content.len(), "Assistant replied");
        Ok(content)
    }
}

/// Prompt asking for a JSON packing list
#[must_use]
pub fn packing_prompt(destination: &str, duration_days: i32, climate: &str) -> String {
    format!(
        "Create a customized packing list for a trip to {destination} for {duration_days} days in a {climate} climate.\n\
         \n\
         Format the response as JSON with the following structure:\n\
         {{\n  \"categories\": [\n    {{\n      \"name\": \"string\",\n      \"items\": [\"string\"]\n    }}\n  ],\n  \"specialItems\": [\"string\"],\n  \"destinationTips\": [\"string\"]\n}}\n\
         \n\
         Only respond with the JSON, no other text."
    )
}

/// Prompt asking for a JSON flight price estimate
#[must_use]
pub fn flight_prompt(from: &str, to: &str, date: NaiveDate) -> String {
    format!(
        "I need realistic flight price estimates for a flight from {from} to {to} on {date}.\n\
         \n\
         Please provide:\n\
         1. A price range (lowest to highest prices)\n\
         2. The average price\n\
         3. A tip for getting the best deal\n\
         4. Best time to book (e.g., \"now\", \"1 month in advance\", etc.)\n\
         \n\
         Format the response as JSON with the following structure:\n\
         {{\n  \"priceRange\": {{ \"low\": number, \"high\": number }},\n  \"averagePrice\": number,\n  \"bestDealTip\": \"string\",\n  \"bestTimeToBook\": \"string\",\n  \"priceClass\": \"low\" | \"medium\" | \"high\"\n}}\n\
         \n\
         Only respond with the JSON, no other text.",
        date = date.format("%Y-%m-%d")
    )
}

/// The JSON object inside a reply, tolerating markdown code fences and chatter
pub(crate) fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssistantPackingReply {
    categories: Vec<AssistantCategory>,
    #[serde(default)]
    special_items: Vec<String>,
    #[serde(default)]
    destination_tips: Vec<String>,
}

#[derive(Deserialize)]
struct AssistantCategory {
    name: String,
    #[serde(default)]
    items: Vec<String>,
}

/// Turn an assistant reply into a packing list for `trip`.
///
/// Names are trimmed, blanks dropped, and categories go through the same
/// merge and de-duplication as locally generated lists.
pub fn parse_packing_reply(reply: &str, trip: TripSummary) -> Result<PackingList> {
    let json = extract_json(reply)
        .ok_or_else(|| PackwiseError::api("Assistant reply did not contain a JSON object"))?;
    let parsed: AssistantPackingReply = serde_json::from_str(json)
        .map_err(|e| PackwiseError::api(format!("Assistant reply has an unexpected shape: {e}")))?;

    let categories = parsed
        .categories
        .into_iter()
        .filter(|c| !c.name.trim().is_empty())
        .map(|c| {
            PackingCategory::from_names(
                c.name.trim(),
                c.items
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty()),
            )
        })
        .collect();
    let categories = normalize_categories(categories);
    if categories.is_empty() {
        return Err(PackwiseError::api("Assistant reply contained no packing items").into());
    }

    Ok(PackingList {
        categories,
        special_items: clean_strings(parsed.special_items),
        destination_tips: clean_strings(parsed.destination_tips),
        generated_for: trip,
    })
}

fn clean_strings(values: Vec<String>) -> Vec<String> {
    let mut cleaned = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() {
            crate::models::packing::push_unique(&mut cleaned, value);
        }
    }
    cleaned
}
