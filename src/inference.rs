//! AI destination inference
//!
//! This module provides the inference collaborator used for cities missing
//! from the preloaded index: a narrow trait the resolver depends on, and an
//! Anthropic-backed implementation that prompts with the closed tag
//! vocabulary and parses the model's JSON reply into a destination bundle.
//! Failures never propagate past the resolver; it substitutes a generic
//! fallback bundle instead.

use crate::config::InferenceConfig;
use crate::models::{Confidence, DestinationBundle, DestinationTags};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Collaborator contract: infer destination tags for an unknown city
///
/// Implementations must only emit values from the controlled vocabulary in
/// [`vocabulary`]. Any failure (network, malformed reply, parse error) is an
/// `Err`; callers are expected to substitute fallback data.
#[async_trait]
pub trait DestinationInference: Send + Sync {
    async fn infer(&self, city: &str, country: &str) -> Result<DestinationBundle>;
}

/// Closed per-dimension tag vocabulary handed to the inference collaborator
pub mod vocabulary {
    pub const GEO_TYPE: &[&str] = &[
        "urban", "rural", "coastal", "desert", "mountain", "forest", "island", "tropical",
        "lakeside", "riverside", "volcanic", "plains", "limestone", "arctic",
    ];

    pub const GEO_REGION: &[&str] = &[
        "east_asia",
        "southeast_asia",
        "south_asia",
        "western_europe",
        "eastern_europe",
        "northern_europe",
        "southern_europe",
        "middle_east",
        "north_africa",
        "sub_saharan_africa",
        "north_america",
        "central_america",
        "south_america",
        "caribbean",
        "oceania",
        "pacific_islands",
        "central_asia",
    ];

    pub const CLIMATE_TYPE: &[&str] = &[
        "tropical",
        "subtropical",
        "mediterranean",
        "continental",
        "oceanic",
        "desert",
        "semi_arid",
        "subarctic",
        "arctic",
        "highland",
        "monsoon",
    ];

    pub const WEATHER_CHARACTERISTICS: &[&str] = &[
        "sunny_most_year",
        "rainy_season",
        "snowy_winters",
        "mild_year_round",
        "extreme_heat_summer",
        "extreme_cold_winter",
        "humid",
        "dry",
        "windy",
        "unpredictable",
    ];

    pub const SEASONAL_FEATURES: &[&str] = &[
        "cherry_blossom",
        "autumn_foliage",
        "christmas_period",
        "easter",
        "ramadan",
        "ski_season",
        "summer_holidays",
        "halloween",
        "lunar_new_year",
        "monsoon_avoid",
        "northern_lights",
        "winter_festivals",
        "tulip_season",
        "spring_festivals",
        "beach_season",
        "midnight_sun",
        "summer_festivals",
        "outdoor_concerts",
        "harvest_festivals",
        "wine_harvest",
        "oktoberfest",
        "ice_hotels",
        "snowy_landscapes",
    ];

    pub const INFRASTRUCTURE: &[&str] =
        &["developed", "developing", "remote", "adventure_infrastructure"];

    pub const TOURISM_CHARACTERISTICS: &[&str] = &[
        "beach_destination",
        "ski_resort",
        "cultural_hub",
        "historical_city",
        "party_destination",
        "foodie_destination",
        "shopping_destination",
        "adventure_base",
        "wellness_destination",
        "business_hub",
        "romantic_destination",
        "family_destination",
        "backpacker_friendly",
        "luxury_destination",
        "spiritual_center",
        "art_capital",
        "music_city",
        "tech_hub",
        "university_town",
    ];

    pub const SPECIAL_FEATURES: &[&str] = &[
        "unesco_sites",
        "theme_parks",
        "casinos",
        "cannabis_legal",
        "lgbtq_friendly",
        "nightlife_hub",
        "wine_region",
        "dive_sites",
        "surf_spots",
        "safari_access",
        "ancient_ruins",
        "royal_heritage",
        "religious_significance",
        "film_location",
        "cruise_port",
        "hot_springs",
    ];
}

/// Anthropic messages API client implementing [`DestinationInference`]
pub struct AnthropicInference {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicInference {
    /// Create a new inference client from configuration
    ///
    /// A missing API key is not an error here; `infer` will fail instead,
    /// which the resolver converts to fallback data.
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Tourcast/0.1.0")
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn build_prompt(city: &str, country: &str) -> String {
        format!(
            r#"You are a travel data expert. Generate tourism tags for a city that will be used for filtering travel categories.

## CITY TO ANALYZE
City: {city}
Country: {country}

## STRICT TAG VOCABULARY

You MUST use ONLY these exact tag values. Do not invent new values.

### geo_type (select ALL that apply):
{geo_type}

### geo_region (select ONE):
{geo_region}

### climate_type (select ONE):
{climate_type}

### weather_characteristics (select ALL that apply):
{weather}

### seasonal_features (select ALL that apply):
{seasonal}

### infrastructure (select ONE):
{infrastructure}

### tourism_characteristics (select ALL that apply):
{tourism}

### special_features (select ALL that apply):
{special}

## INSTRUCTIONS

1. Research or use your knowledge about {city}, {country}
2. Select appropriate tags from EACH category above
3. Be accurate - only select tags that truly apply
4. Consider physical geography, climate, what the city is famous for tourism-wise, seasonal events, infrastructure level and special attractions

## OUTPUT FORMAT

Return ONLY valid JSON, no other text:

{{
  "city": "{city}",
  "country": "{country}",
  "region": "<geo_region value>",
  "tags": {{
    "geo_type": ["<value1>", "<value2>"],
    "geo_region": ["<single value>"],
    "climate_type": ["<single value>"],
    "weather_characteristics": ["<value1>", "<value2>"],
    "seasonal_features": ["<value1>", "<value2>"],
    "infrastructure": ["<single value>"],
    "tourism_characteristics": ["<value1>", "<value2>"],
    "special_features": ["<value1>", "<value2>"]
  }},
  "confidence": "<high|medium|low>",
  "notes": "<brief note if low confidence>"
}}"#,
            geo_type = vocabulary::GEO_TYPE.join(", "),
            geo_region = vocabulary::GEO_REGION.join(", "),
            climate_type = vocabulary::CLIMATE_TYPE.join(", "),
            weather = vocabulary::WEATHER_CHARACTERISTICS.join(", "),
            seasonal = vocabulary::SEASONAL_FEATURES.join(", "),
            infrastructure = vocabulary::INFRASTRUCTURE.join(", "),
            tourism = vocabulary::TOURISM_CHARACTERISTICS.join(", "),
            special = vocabulary::SPECIAL_FEATURES.join(", "),
        )
    }
}

#[async_trait]
impl DestinationInference for AnthropicInference {
    #[instrument(skip(self))]
    async fn infer(&self, city: &str, country: &str) -> Result<DestinationBundle> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("No Anthropic API key configured"))?;

        debug!("Requesting destination inference for {}, {}", city, country);

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{"role": "user", "content": Self::build_prompt(city, country)}],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .with_context(|| "Inference request failed")?
            .error_for_status()
            .with_context(|| "Inference request rejected")?;

        let message: MessagesResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse messages response")?;

        let text = message
            .content
            .first()
            .map(|block| block.text.as_str())
            .ok_or_else(|| anyhow!("Empty inference response"))?;

        let inferred: InferredDestination = serde_json::from_str(strip_code_fences(text))
            .with_context(|| "Inference response is not valid destination JSON")?;

        let bundle = inferred.into_bundle();
        info!(
            "Inference complete for {}, {} (confidence: {:?})",
            city, country, bundle.inference_confidence
        );

        Ok(bundle)
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// The JSON schema the model is instructed to emit
#[derive(Debug, Deserialize)]
struct InferredDestination {
    city: String,
    country: String,
    #[serde(default)]
    region: String,
    tags: DestinationTags,
    confidence: Option<Confidence>,
    notes: Option<String>,
}

impl InferredDestination {
    fn into_bundle(self) -> DestinationBundle {
        DestinationBundle {
            city: self.city,
            country: self.country,
            region: self.region,
            tags: self.tags,
            from_database: false,
            // Missing self-reported confidence defaults to medium
            inference_confidence: Some(self.confidence.unwrap_or(Confidence::Medium)),
            notes: self.notes,
        }
    }
}

/// Strip surrounding markdown code fences from a model reply
fn strip_code_fences(text: &str) -> &str {
    if let Some(rest) = text.split("```json").nth(1) {
        rest.split("```").next().unwrap_or(rest).trim()
    } else if let Some(rest) = text.split("```").nth(1) {
        rest.split("```").next().unwrap_or(rest).trim()
    } else {
        text.trim()
    }
}
