//! Data models for the Tourcast engine
//!
//! This module contains the core domain types shared across the pipeline:
//! - Category: a pre-tagged catalog entry (place, activity or dining option)
//! - DestinationBundle: resolved city characteristics with provenance
//! - TripRequest: the traveller's dates, trip type and budget

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Which catalog list a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Places,
    Activities,
    DiningCuisines,
    DiningFormats,
    DiningDietary,
}

/// A single tourism category from the catalog
///
/// Categories are immutable once loaded; the ranking pipeline only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category name, unique within its list
    pub name: String,
    /// List this category belongs to (assigned while flattening the catalog)
    pub list: ListKind,
    /// Grouping label (assigned while flattening the catalog)
    pub parent_category: String,
    /// Tag dimensions driving filtering and scoring
    #[serde(default)]
    pub tags: CategoryTags,
    /// Template used by downstream search integrations
    #[serde(default)]
    pub search_query_template: String,
    #[serde(default)]
    pub description: String,
}

/// Tag dimensions a category may declare
///
/// Every dimension accepts either a single string or an array in the source
/// JSON; an absent dimension means "no constraint" for the hard filters and
/// "no bonus" for the scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTags {
    #[serde(default, deserialize_with = "string_or_seq")]
    pub trip_exclude: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub budget_exclude: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub geo_type: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub geo_region: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub infrastructure: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub weather_requirement: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub trip_ideal: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub budget_level: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub season: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub season_special: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub tourism_characteristics: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub special_features: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub vibe: Vec<String>,
    /// Geographic origin of a cuisine ("global" or a geo_region value)
    #[serde(default)]
    pub home_region: Option<String>,
}

/// Destination tag dimensions (the city-side vocabulary)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationTags {
    #[serde(default, deserialize_with = "string_or_seq")]
    pub geo_type: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub geo_region: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub climate_type: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub weather_characteristics: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub seasonal_features: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub infrastructure: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub tourism_characteristics: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub special_features: Vec<String>,
}

/// Self-reported confidence of an inferred destination bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    Fallback,
}

/// Resolved destination characteristics with provenance metadata
///
/// Created once per lookup and never mutated afterwards. `from_database`
/// distinguishes preloaded entries from inferred ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationBundle {
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub region: String,
    pub tags: DestinationTags,
    pub from_database: bool,
    pub inference_confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DestinationBundle {
    /// Generic bundle returned when inference fails for an unknown city
    #[must_use]
    pub fn fallback(city: &str, country: &str) -> Self {
        Self {
            city: city.to_string(),
            country: country.to_string(),
            region: "unknown".to_string(),
            tags: DestinationTags {
                geo_type: vec!["urban".to_string()],
                geo_region: vec!["unknown".to_string()],
                climate_type: vec!["unknown".to_string()],
                infrastructure: vec!["developed".to_string()],
                tourism_characteristics: vec!["cultural_hub".to_string()],
                ..DestinationTags::default()
            },
            from_database: false,
            inference_confidence: Some(Confidence::Fallback),
            notes: Some("Using generic fallback data due to inference failure".to_string()),
        }
    }
}

/// Travel date range; only `start` drives season and period detection
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The traveller's trip parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub dates: DateRange,
    pub trip_type: String,
    pub budget: String,
    /// Maximum number of parent categories per list (web-layer concern)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Deserialize a tag dimension given either as a single string or an array
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
