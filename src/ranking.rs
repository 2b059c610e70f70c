//! Category ranking pipeline
//!
//! Orchestrates destination resolution, temporal context, hard filtering and
//! scoring over the full catalog, producing ranked result buckets with a
//! deterministic fallback for empty places/activities lists. Ranking never
//! fails: unknown destinations and empty buckets all resolve to well-defined
//! fallback data.

use crate::destination::DestinationResolver;
use crate::models::{Category, DestinationBundle, DestinationTags, ListKind, TripRequest};
use crate::temporal::{self, DateContext};
use crate::{filter, scoring};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Maximum generic fallback entries per bucket
const FALLBACK_LIMIT: usize = 10;

/// Number of exclusion examples surfaced in the output
const EXCLUSION_EXAMPLES: usize = 5;

/// One accepted catalog entry with its relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCategory {
    pub name: String,
    pub parent_category: String,
    pub relevance_score: u32,
    pub search_query_template: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_fallback: bool,
}

/// One rejected catalog entry and the rule that rejected it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedCategory {
    pub name: String,
    pub parent_category: String,
    pub reason: String,
}

/// Destination summary exposed to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    pub city: String,
    pub country: String,
    pub from_database: bool,
    pub inference_confidence: Option<crate::models::Confidence>,
    pub city_tags: CityTagSummary,
}

/// Restricted subset of destination tags included in the output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityTagSummary {
    pub geo_type: Vec<String>,
    pub geo_region: Vec<String>,
    pub climate_type: Vec<String>,
    pub tourism_characteristics: Vec<String>,
    pub special_features: Vec<String>,
}

/// Dining buckets grouped by facet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningRecommendations {
    pub cuisines: Vec<RankedCategory>,
    pub formats: Vec<RankedCategory>,
    pub dietary: Vec<RankedCategory>,
}

/// Full ranked result for one trip request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedOutput {
    pub city_info: CityInfo,
    pub date_context: DateContext,
    pub places: Vec<RankedCategory>,
    pub activities: Vec<RankedCategory>,
    pub dining: DiningRecommendations,
    pub excluded_count: usize,
    pub excluded_examples: Vec<ExcludedCategory>,
}

/// Rank the catalog for a destination and trip request
///
/// The destination is resolved once and the date context derived once; every
/// category is then evaluated in catalog load order. Buckets are sorted by
/// score descending with a stable sort, so equal scores keep load order.
#[instrument(skip(catalog, request, resolver), fields(categories = catalog.len()))]
pub async fn rank(
    catalog: &[Category],
    city: &str,
    country: &str,
    request: &TripRequest,
    resolver: &DestinationResolver,
) -> RankedOutput {
    let destination = resolver.resolve(city, country).await;
    let context = temporal::date_context(request.dates.start, &destination.tags);
    debug!(
        "Date context: {} ({:?}), periods {:?}",
        context.season, context.hemisphere, context.special_periods
    );

    let mut places = Vec::new();
    let mut activities = Vec::new();
    let mut dining = DiningRecommendations::default();
    let mut excluded = Vec::new();

    for category in catalog {
        if let Some(reason) =
            filter::check_hard_filters(category, request, &destination.tags, &context)
        {
            excluded.push(ExcludedCategory {
                name: category.name.clone(),
                parent_category: category.parent_category.clone(),
                reason,
            });
            continue;
        }

        let score = scoring::relevance_score(category, request, &destination.tags, &context);
        let item = ranked_item(category, score, false);

        match category.list {
            ListKind::Places => places.push(item),
            ListKind::Activities => activities.push(item),
            ListKind::DiningCuisines => dining.cuisines.push(item),
            ListKind::DiningFormats => dining.formats.push(item),
            ListKind::DiningDietary => dining.dietary.push(item),
        }
    }

    for bucket in [
        &mut places,
        &mut activities,
        &mut dining.cuisines,
        &mut dining.formats,
        &mut dining.dietary,
    ] {
        // Vec::sort_by is stable; ties keep catalog order
        bucket.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    }

    // Generic fallback for empty places/activities; dining never falls back
    apply_fallback_if_empty(&mut places, catalog, ListKind::Places);
    apply_fallback_if_empty(&mut activities, catalog, ListKind::Activities);

    info!(
        "Ranked {} categories: {} places, {} activities, {} excluded",
        catalog.len(),
        places.len(),
        activities.len(),
        excluded.len()
    );

    let excluded_count = excluded.len();
    excluded.truncate(EXCLUSION_EXAMPLES);

    RankedOutput {
        city_info: city_info(city, country, &destination),
        date_context: context,
        places,
        activities,
        dining,
        excluded_count,
        excluded_examples: excluded,
    }
}

fn ranked_item(category: &Category, score: u32, is_fallback: bool) -> RankedCategory {
    RankedCategory {
        name: category.name.clone(),
        parent_category: category.parent_category.clone(),
        relevance_score: score,
        search_query_template: category.search_query_template.clone(),
        description: category.description.clone(),
        is_fallback,
    }
}

/// Replace an empty bucket with generic all-season, geo-agnostic categories
fn apply_fallback_if_empty(
    bucket: &mut Vec<RankedCategory>,
    catalog: &[Category],
    list: ListKind,
) {
    if !bucket.is_empty() {
        return;
    }

    let generic: Vec<RankedCategory> = catalog
        .iter()
        .filter(|category| category.list == list)
        .filter(|category| {
            let tags = &category.tags;
            tags.season.iter().any(|s| s == "all_season")
                && (tags.geo_type.is_empty()
                    || (tags.geo_type.len() == 1 && tags.geo_type[0] == "all"))
        })
        .take(FALLBACK_LIMIT)
        .map(|category| ranked_item(category, 0, true))
        .collect();

    if !generic.is_empty() {
        warn!(
            "No {:?} matched filters, using {} generic fallbacks",
            list,
            generic.len()
        );
        *bucket = generic;
    }
}

fn city_info(city: &str, country: &str, destination: &DestinationBundle) -> CityInfo {
    CityInfo {
        city: city.to_string(),
        country: country.to_string(),
        from_database: destination.from_database,
        inference_confidence: destination.inference_confidence,
        city_tags: tag_summary(&destination.tags),
    }
}

fn tag_summary(tags: &DestinationTags) -> CityTagSummary {
    CityTagSummary {
        geo_type: tags.geo_type.clone(),
        geo_region: tags.geo_region.clone(),
        climate_type: tags.climate_type.clone(),
        tourism_characteristics: tags.tourism_characteristics.clone(),
        special_features: tags.special_features.clone(),
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}
