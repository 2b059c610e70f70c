//! HTTP API handlers
//!
//! JSON endpoints consumed by the frontend: category filtering, the city
//! dropdown index, the raw catalog and a health check. Parent-category
//! capping happens here rather than in the ranking pipeline, so library
//! callers always see the complete ranked lists.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::destination::DestinationResolver;
use crate::models::{Category, DateRange, TripRequest};
use crate::ranking::{self, RankedCategory};

/// Default number of parent categories kept per list
const DEFAULT_PARENT_LIMIT: usize = 20;

/// Lower bound on the parent-category limit
const MIN_PARENT_LIMIT: usize = 10;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<Category>>,
    pub catalog_raw: Arc<Value>,
    pub resolver: Arc<DestinationResolver>,
}

/// Body of a POST /filter request
#[derive(Debug, Deserialize)]
pub struct FilterPayload {
    pub city: Option<String>,
    pub country: Option<String>,
    pub dates: Option<FilterDates>,
    pub trip_type: Option<String>,
    pub budget: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FilterDates {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// One country with its cities, for the frontend dropdown
#[derive(Debug, Serialize)]
pub struct CountryCities {
    pub country: String,
    pub cities: Vec<CityEntry>,
}

#[derive(Debug, Serialize)]
pub struct CityEntry {
    pub city: String,
    pub region: String,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": message.into()})),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/filter", post(filter_categories))
        .route("/cities", get(get_cities))
        .route("/categories", get(get_categories))
        .route("/health", get(health_check))
        .with_state(state)
}

/// POST /filter: rank the catalog for a city, dates, trip type and budget
async fn filter_categories(
    State(state): State<AppState>,
    Json(payload): Json<FilterPayload>,
) -> Result<Json<ranking::RankedOutput>, ApiError> {
    let (city, country, request, limit) = validate_payload(payload)?;

    info!("Filter request for {}, {}", city, country);

    let mut output =
        ranking::rank(&state.catalog, &city, &country, &request, &state.resolver).await;

    output.places = limit_by_parent_category(output.places, limit);
    output.activities = limit_by_parent_category(output.activities, limit);
    output.dining.cuisines = limit_by_parent_category(output.dining.cuisines, limit);

    Ok(Json(output))
}

/// GET /cities: database cities grouped by country, sorted for dropdowns
async fn get_cities(State(state): State<AppState>) -> Json<Vec<CountryCities>> {
    let mut by_country: HashMap<String, Vec<CityEntry>> = HashMap::new();
    for record in state.resolver.index().records() {
        by_country
            .entry(record.country.clone())
            .or_default()
            .push(CityEntry {
                city: record.city.clone(),
                region: record.region.clone(),
            });
    }

    let mut result: Vec<CountryCities> = by_country
        .into_iter()
        .map(|(country, mut cities)| {
            cities.sort_by(|a, b| a.city.cmp(&b.city));
            CountryCities { country, cities }
        })
        .collect();
    result.sort_by(|a, b| a.country.cmp(&b.country));

    Json(result)
}

/// GET /categories: the catalog file, served verbatim
async fn get_categories(State(state): State<AppState>) -> Json<Value> {
    Json(state.catalog_raw.as_ref().clone())
}

/// GET /health: liveness plus loaded data counts
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "cities_loaded": state.resolver.index().len(),
        "categories_loaded": state.catalog.len(),
    }))
}

fn validate_payload(
    payload: FilterPayload,
) -> Result<(String, String, TripRequest, usize), ApiError> {
    let city = required(payload.city, "city")?;
    let country = required(payload.country, "country")?;
    let trip_type = required(payload.trip_type, "trip_type")?;
    let budget = required(payload.budget, "budget")?;

    let dates = payload
        .dates
        .ok_or_else(|| bad_request("Missing required field: dates"))?;
    let (Some(start), Some(end)) = (dates.start, dates.end) else {
        return Err(bad_request("Dates must include start and end"));
    };

    let limit = payload
        .limit
        .unwrap_or(DEFAULT_PARENT_LIMIT)
        .max(MIN_PARENT_LIMIT);

    let request = TripRequest {
        dates: DateRange { start, end },
        trip_type,
        budget,
        limit: payload.limit,
    };

    Ok((city, country, request, limit))
}

fn required(field: Option<String>, name: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(bad_request(format!("Missing required field: {name}"))),
    }
}

/// Cap the number of parent categories while keeping all their subcategories
///
/// Parents are ranked by the mean score of their members and the top
/// `max_parents` survive, each with its full membership. Members stay in
/// their incoming order; parents are emitted best-average first.
#[must_use]
pub fn limit_by_parent_category(
    items: Vec<RankedCategory>,
    max_parents: usize,
) -> Vec<RankedCategory> {
    if items.is_empty() {
        return items;
    }

    // Group members by parent, keeping first-appearance parent order
    let mut parent_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RankedCategory>> = HashMap::new();
    for item in items {
        if !groups.contains_key(&item.parent_category) {
            parent_order.push(item.parent_category.clone());
        }
        groups
            .entry(item.parent_category.clone())
            .or_default()
            .push(item);
    }

    let mean_score = |members: &[RankedCategory]| -> f64 {
        let total: u32 = members.iter().map(|m| m.relevance_score).sum();
        f64::from(total) / members.len() as f64
    };

    let mut scored: Vec<(String, f64)> = parent_order
        .into_iter()
        .map(|parent| {
            let score = mean_score(&groups[&parent]);
            (parent, score)
        })
        .collect();
    // Stable sort keeps first-appearance order for equal averages
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(max_parents)
        .flat_map(|(parent, _)| groups.remove(&parent).unwrap_or_default())
        .collect()
}
