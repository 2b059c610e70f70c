//! Hard exclusion filters
//!
//! Absolute requirements a category must meet for the given trip. Rules are
//! checked in a fixed order and short-circuit: the first failing rule wins
//! and its human-readable reason is reported back to the caller.

use crate::models::{Category, DestinationTags, TripRequest};
use crate::temporal::{DateContext, Season};

/// Evaluate the hard filters for one category
///
/// Returns `None` when the category passes, or `Some(reason)` describing the
/// first rule that rejected it. An absent or empty requirement dimension is
/// treated as "no constraint"; for geo_type, geo_region and infrastructure an
/// explicit `all` requirement also passes everything.
#[must_use]
pub fn check_hard_filters(
    category: &Category,
    request: &TripRequest,
    destination: &DestinationTags,
    context: &DateContext,
) -> Option<String> {
    let tags = &category.tags;

    // 1. Trip type exclusions
    if tags.trip_exclude.contains(&request.trip_type) {
        return Some(format!("trip_type '{}' is excluded", request.trip_type));
    }

    // 2. Budget exclusions
    if tags.budget_exclude.contains(&request.budget) {
        return Some(format!("budget '{}' is excluded", request.budget));
    }

    // 3. Geo type requirements
    if !is_unconstrained(&tags.geo_type) && !intersects(&tags.geo_type, &destination.geo_type) {
        return Some(format!(
            "geo_type mismatch: requires {:?}, destination has {:?}",
            tags.geo_type, destination.geo_type
        ));
    }

    // 4. Geo region requirements ('all' anywhere in the list lifts the rule)
    if !tags.geo_region.is_empty()
        && !tags.geo_region.iter().any(|r| r == "all")
        && !intersects(&tags.geo_region, &destination.geo_region)
    {
        return Some(format!(
            "geo_region mismatch: requires {:?}, destination has {:?}",
            tags.geo_region, destination.geo_region
        ));
    }

    // 5. Infrastructure requirements
    if !is_unconstrained(&tags.infrastructure)
        && !intersects(&tags.infrastructure, &destination.infrastructure)
    {
        return Some(format!(
            "infrastructure mismatch: requires {:?}, destination has {:?}",
            tags.infrastructure, destination.infrastructure
        ));
    }

    // 6. Warm weather requirement: rejected in winter unless the climate
    //    stays warm year-round
    if tags.weather_requirement.iter().any(|w| w == "warm_weather_required")
        && context.season == Season::Winter
        && !destination
            .climate_type
            .iter()
            .any(|c| matches!(c.as_str(), "tropical" | "subtropical" | "mediterranean"))
    {
        return Some("warm weather required but visiting in cold season".to_string());
    }

    // 7. Cold weather requirement: rejected in warm seasons regardless of
    //    the destination climate
    if tags.weather_requirement.iter().any(|w| w == "cold_weather_required")
        && matches!(context.season, Season::Summer | Season::Spring)
    {
        return Some("cold weather required but visiting in warm season".to_string());
    }

    None
}

/// True when a requirement list imposes no constraint (empty or exactly ["all"])
fn is_unconstrained(required: &[String]) -> bool {
    required.is_empty() || (required.len() == 1 && required[0] == "all")
}

fn intersects(required: &[String], available: &[String]) -> bool {
    required.iter().any(|value| available.contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTags, DateRange, ListKind};
    use crate::temporal::Hemisphere;
    use chrono::NaiveDate;

    fn category(tags: CategoryTags) -> Category {
        Category {
            name: "Test Category".to_string(),
            list: ListKind::Places,
            parent_category: "Test Parent".to_string(),
            tags,
            search_query_template: String::new(),
            description: String::new(),
        }
    }

    fn request(trip_type: &str, budget: &str) -> TripRequest {
        let start = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        TripRequest {
            dates: DateRange {
                start,
                end: start + chrono::Duration::days(7),
            },
            trip_type: trip_type.to_string(),
            budget: budget.to_string(),
            limit: None,
        }
    }

    fn context(season: Season) -> DateContext {
        DateContext {
            season,
            adjusted_season: season,
            special_periods: Vec::new(),
            hemisphere: Hemisphere::Northern,
            month: 6,
        }
    }

    #[test]
    fn test_trip_type_exclusion() {
        let cat = category(CategoryTags {
            trip_exclude: vec![
                "family_young_children".to_string(),
                "business_travel".to_string(),
            ],
            ..CategoryTags::default()
        });

        let reason = check_hard_filters(
            &cat,
            &request("family_young_children", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Summer),
        );

        assert!(reason.unwrap().contains("trip_type"));
    }

    #[test]
    fn test_budget_exclusion() {
        let cat = category(CategoryTags {
            budget_exclude: vec!["luxury".to_string()],
            ..CategoryTags::default()
        });

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "luxury"),
            &DestinationTags::default(),
            &context(Season::Summer),
        );

        assert!(reason.unwrap().contains("budget"));
    }

    #[test]
    fn test_geo_type_mismatch() {
        let cat = category(CategoryTags {
            geo_type: vec!["coastal".to_string(), "island".to_string()],
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_type: vec!["urban".to_string(), "mountain".to_string()],
            ..DestinationTags::default()
        };

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer),
        );

        assert!(reason.unwrap().contains("geo_type"));
    }

    #[test]
    fn test_geo_type_all_is_unconstrained() {
        let cat = category(CategoryTags {
            geo_type: vec!["all".to_string()],
            ..CategoryTags::default()
        });

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Summer),
        );

        assert!(reason.is_none());
    }

    #[test]
    fn test_geo_region_mismatch() {
        let cat = category(CategoryTags {
            geo_region: vec!["southeast_asia".to_string(), "east_asia".to_string()],
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: vec!["western_europe".to_string()],
            ..DestinationTags::default()
        };

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer),
        );

        assert!(reason.unwrap().contains("geo_region"));
    }

    #[test]
    fn test_geo_region_containing_all_passes() {
        let cat = category(CategoryTags {
            geo_region: vec!["all".to_string(), "east_asia".to_string()],
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: vec!["western_europe".to_string()],
            ..DestinationTags::default()
        };

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer),
        );

        assert!(reason.is_none());
    }

    #[test]
    fn test_infrastructure_mismatch() {
        let cat = category(CategoryTags {
            infrastructure: vec!["adventure_infrastructure".to_string()],
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            infrastructure: vec!["developed".to_string()],
            ..DestinationTags::default()
        };

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer),
        );

        assert!(reason.unwrap().contains("infrastructure"));
    }

    #[test]
    fn test_warm_weather_requirement_in_winter() {
        let cat = category(CategoryTags {
            weather_requirement: vec!["warm_weather_required".to_string()],
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            climate_type: vec!["continental".to_string()],
            ..DestinationTags::default()
        };

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Winter),
        );

        assert!(reason.unwrap().contains("warm weather"));
    }

    #[test]
    fn test_warm_weather_ok_in_winter_for_tropical_climate() {
        let cat = category(CategoryTags {
            weather_requirement: vec!["warm_weather_required".to_string()],
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            climate_type: vec!["tropical".to_string()],
            ..DestinationTags::default()
        };

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Winter),
        );

        assert!(reason.is_none());
    }

    #[test]
    fn test_cold_weather_requirement_ignores_climate() {
        let cat = category(CategoryTags {
            weather_requirement: vec!["cold_weather_required".to_string()],
            ..CategoryTags::default()
        });
        // Even a subarctic destination is rejected in warm seasons
        let destination = DestinationTags {
            climate_type: vec!["subarctic".to_string()],
            ..DestinationTags::default()
        };

        for season in [Season::Summer, Season::Spring] {
            let reason = check_hard_filters(
                &cat,
                &request("solo_trip", "mid_range"),
                &destination,
                &context(season),
            );
            assert!(reason.unwrap().contains("cold weather"));
        }

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Winter),
        );
        assert!(reason.is_none());
    }

    #[test]
    fn test_unconstrained_category_always_passes() {
        let cat = category(CategoryTags::default());
        let destination = DestinationTags {
            geo_type: vec!["urban".to_string()],
            geo_region: vec!["western_europe".to_string()],
            ..DestinationTags::default()
        };

        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            let reason = check_hard_filters(
                &cat,
                &request("solo_trip", "mid_range"),
                &destination,
                &context(season),
            );
            assert!(reason.is_none());
        }
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Category fails both the trip and budget rules; the trip reason is reported
        let cat = category(CategoryTags {
            trip_exclude: vec!["solo_trip".to_string()],
            budget_exclude: vec!["budget".to_string()],
            ..CategoryTags::default()
        });

        let reason = check_hard_filters(
            &cat,
            &request("solo_trip", "budget"),
            &DestinationTags::default(),
            &context(Season::Summer),
        );

        assert!(reason.unwrap().contains("trip_type"));
    }
}
