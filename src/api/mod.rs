use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::PackwiseError;
use crate::flight::{FlightEstimate, FlightQuery};
use crate::models::{PackingList, TravelerType, TripRequest};
use crate::packing::progress_percent;
use crate::planner::{PackingPlanner, PlanOptions, Source};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<PackingPlanner>,
}

impl AppState {
    pub fn new(planner: PackingPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}

/// Handler failure mapped onto a status code and a JSON `{error}` body
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Failed(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Failed(err)
    }
}

impl From<PackwiseError> for ApiError {
    fn from(err: PackwiseError) -> Self {
        ApiError::Failed(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(key) => (StatusCode::NOT_FOUND, format!("No packing list saved as '{key}'")),
            ApiError::Failed(err) => match err.downcast_ref::<PackwiseError>() {
                Some(e @ PackwiseError::Validation { .. }) => (StatusCode::UNPROCESSABLE_ENTITY, e.user_message()),
                Some(e) => {
                    tracing::error!("Request failed: {:#}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
                }
                None => {
                    tracing::error!("Request failed: {:#}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
                }
            },
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub destination: String,
    pub duration_days: i32,
    pub traveler_type: String,
    #[serde(default)]
    pub measured_temp_celsius: Option<f64>,
    #[serde(default)]
    pub enhance: bool,
    #[serde(default)]
    pub save_as: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub list: PackingList,
    pub progress_percent: u8,
    pub source: Source,
    pub notices: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub list: PackingList,
    pub progress_percent: u8,
}

impl From<PackingList> for ListResponse {
    fn from(list: PackingList) -> Self {
        Self {
            progress_percent: progress_percent(&list),
            list,
        }
    }
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub category: String,
    pub item: String,
}

#[derive(Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct FlightRequest {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
}

#[derive(Serialize)]
pub struct FlightResponse {
    #[serde(flatten)]
    pub estimate: FlightEstimate,
    pub source: Source,
    pub notices: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/packing-lists", post(generate_list))
        .route("/packing-lists/{key}", get(get_list))
        .route("/packing-lists/{key}/toggle", post(toggle_item))
        .route("/destinations/suggest", get(suggest_destinations))
        .route("/flights/estimate", post(estimate_flight))
        .with_state(state)
}

async fn generate_list(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let traveler_type: TravelerType = body.traveler_type.parse()?;
    let request = TripRequest {
        destination: body.destination,
        duration_days: body.duration_days,
        traveler_type,
        measured_temp_celsius: body.measured_temp_celsius,
    };
    let options = PlanOptions {
        enhance: body.enhance,
        save_as: body.save_as.filter(|key| !key.trim().is_empty()),
    };

    let outcome = state.planner.plan(request, options).await?;
    Ok(Json(GenerateResponse {
        progress_percent: progress_percent(&outcome.list),
        list: outcome.list,
        source: outcome.source,
        notices: outcome.notices,
    }))
}

async fn get_list(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ListResponse>, ApiError> {
    match state.planner.load(&key).await? {
        Some(list) => Ok(Json(list.into())),
        None => Err(ApiError::NotFound(key)),
    }
}

async fn toggle_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<ListResponse>, ApiError> {
    match state.planner.toggle(&key, &body.category, &body.item).await? {
        Some(list) => Ok(Json(list.into())),
        None => Err(ApiError::NotFound(key)),
    }
}

async fn suggest_destinations(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<String>> {
    Json(state.planner.suggest(&params.q).await)
}

async fn estimate_flight(
    State(state): State<AppState>,
    Json(body): Json<FlightRequest>,
) -> Result<Json<FlightResponse>, ApiError> {
    let query = FlightQuery {
        from: body.from,
        to: body.to,
        date: body.date,
    };
    let outcome = state
        .planner
        .estimate_flight(&query, Utc::now().date_naive())
        .await?;
    Ok(Json(FlightResponse {
        estimate: outcome.estimate,
        source: outcome.source,
        notices: outcome.notices,
    }))
}
