//! Relevance scoring
//!
//! Computes a bounded 0-100 score measuring how well a category fits the
//! trip request, destination and travel dates. Purely additive: every rule
//! contributes a non-negative bonus and the sum is capped at 100.

use crate::models::{Category, DestinationTags, TripRequest};
use crate::temporal::DateContext;

const MAX_SCORE: u32 = 100;

/// Calculate the relevance score for a category
#[must_use]
pub fn relevance_score(
    category: &Category,
    request: &TripRequest,
    destination: &DestinationTags,
    context: &DateContext,
) -> u32 {
    let mut score = 0u32;
    let tags = &category.tags;

    // 1. Trip type match
    if tags.trip_ideal.contains(&request.trip_type) {
        score += 15;
    }

    // 2. Budget match
    if tags.budget_level.contains(&request.budget) {
        score += 10;
    }

    // 3. Season match: +20 for the exact season, +10 for all-season otherwise
    if tags.season.iter().any(|s| s == context.season.as_str()) {
        score += 20;
    } else if tags.season.iter().any(|s| s == "all_season") {
        score += 10;
    }

    // 4. Special period bonus: first match only, not cumulative
    if context
        .special_periods
        .iter()
        .any(|period| tags.season_special.contains(period))
    {
        score += 15;
    }

    // 5. Tourism characteristics alignment: +5 per match, capped at +20
    let tourism_matches = tags
        .tourism_characteristics
        .iter()
        .filter(|t| destination.tourism_characteristics.contains(t))
        .count() as u32;
    score += (tourism_matches * 5).min(20);

    // 6. Special features match: +10 per match, capped at +20
    let special_matches = tags
        .special_features
        .iter()
        .filter(|s| destination.special_features.contains(s))
        .count() as u32;
    score += (special_matches * 10).min(20);

    // 7. Vibe bonuses
    if tags.vibe.iter().any(|v| v == "bucket_list") {
        score += 5;
    }
    if tags.vibe.iter().any(|v| v == "instagram_worthy") {
        score += 3;
    }

    // 8. Cuisine home-region proximity (dining categories)
    if let Some(home_region) = tags.home_region.as_deref() {
        score += home_region_bonus(home_region, destination);
    }

    score.min(MAX_SCORE)
}

/// Proximity bonus for a cuisine's geographic origin
///
/// Global cuisines get a flat bonus everywhere; otherwise the cuisine scores
/// highest in its own region and a reduced bonus in neighbouring regions.
/// The adjacency table is directed, so both directions are looked up
/// independently rather than assuming symmetry.
fn home_region_bonus(home_region: &str, destination: &DestinationTags) -> u32 {
    if home_region == "global" {
        return 10;
    }

    let Some(destination_region) = destination.geo_region.first() else {
        return 0;
    };

    if home_region == destination_region {
        20
    } else if neighbour_regions(home_region).contains(&destination_region.as_str())
        || neighbour_regions(destination_region).contains(&home_region)
    {
        12
    } else {
        0
    }
}

/// Directed region adjacency for cuisine proximity
///
/// Reproduced verbatim from the curated source data; some relations are not
/// mutually listed, which is why callers check both directions.
fn neighbour_regions(region: &str) -> &'static [&'static str] {
    match region {
        "eastern_europe" => &[
            "western_europe",
            "northern_europe",
            "southern_europe",
            "central_asia",
            "middle_east",
        ],
        "western_europe" => &[
            "eastern_europe",
            "northern_europe",
            "southern_europe",
            "north_africa",
        ],
        "northern_europe" => &["western_europe", "eastern_europe"],
        "southern_europe" => &[
            "western_europe",
            "eastern_europe",
            "north_africa",
            "middle_east",
        ],
        "middle_east" => &[
            "eastern_europe",
            "southern_europe",
            "north_africa",
            "central_asia",
            "south_asia",
        ],
        "central_asia" => &["eastern_europe", "middle_east", "south_asia", "east_asia"],
        "east_asia" => &["southeast_asia", "central_asia", "oceania"],
        "southeast_asia" => &["east_asia", "south_asia", "oceania"],
        "south_asia" => &["middle_east", "central_asia", "southeast_asia"],
        "north_africa" => &[
            "western_europe",
            "southern_europe",
            "middle_east",
            "sub_saharan_africa",
        ],
        "sub_saharan_africa" => &["north_africa", "middle_east"],
        "north_america" => &["central_america", "caribbean"],
        "central_america" => &["north_america", "south_america", "caribbean"],
        "south_america" => &["central_america", "caribbean"],
        "caribbean" => &["north_america", "central_america", "south_america"],
        "oceania" => &["east_asia", "southeast_asia", "pacific_islands"],
        "pacific_islands" => &["oceania", "southeast_asia"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTags, DateRange, ListKind};
    use crate::temporal::{Hemisphere, Season};
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

    fn context(season: Season, special_periods: &[&str]) -> DateContext {
        DateContext {
            season,
            adjusted_season: season,
            special_periods: special_periods.iter().map(ToString::to_string).collect(),
            hemisphere: Hemisphere::Northern,
            month: 6,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_trip_type_match_bonus() {
        let cat = category(CategoryTags {
            trip_ideal: strings(&["romantic_couple"]),
            season: strings(&["all_season"]),
            ..CategoryTags::default()
        });

        let score = relevance_score(
            &cat,
            &request("romantic_couple", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Summer, &[]),
        );

        // +15 trip match, +10 all-season
        assert_eq!(score, 25);
    }

    #[test]
    fn test_budget_match_bonus() {
        let cat = category(CategoryTags {
            budget_level: strings(&["mid_range", "luxury"]),
            ..CategoryTags::default()
        });

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 10);
    }

    #[test]
    fn test_exact_season_beats_all_season() {
        let exact = category(CategoryTags {
            season: strings(&["summer", "all_season"]),
            ..CategoryTags::default()
        });
        let all_season_only = category(CategoryTags {
            season: strings(&["winter", "all_season"]),
            ..CategoryTags::default()
        });

        let ctx = context(Season::Summer, &[]);
        let req = request("solo_trip", "mid_range");

        assert_eq!(relevance_score(&exact, &req, &DestinationTags::default(), &ctx), 20);
        assert_eq!(
            relevance_score(&all_season_only, &req, &DestinationTags::default(), &ctx),
            10
        );
    }

    #[test]
    fn test_special_period_bonus_not_cumulative() {
        let cat = category(CategoryTags {
            season_special: strings(&["christmas_period", "winter_festivals"]),
            ..CategoryTags::default()
        });

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Winter, &["christmas_period", "winter_festivals"]),
        );

        // A single +15 even though two periods match
        assert_eq!(score, 15);
    }

    #[test]
    fn test_tourism_characteristics_capped_at_20() {
        let cat = category(CategoryTags {
            tourism_characteristics: strings(&[
                "cultural_hub",
                "historical_city",
                "foodie_destination",
                "art_capital",
                "romantic_destination",
            ]),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            tourism_characteristics: strings(&[
                "cultural_hub",
                "historical_city",
                "foodie_destination",
                "art_capital",
                "romantic_destination",
            ]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer, &[]),
        );

        // 5 matches x 5 = 25, capped at 20
        assert_eq!(score, 20);
    }

    #[test]
    fn test_special_features_capped_at_20() {
        let cat = category(CategoryTags {
            special_features: strings(&["unesco_sites", "ancient_ruins", "royal_heritage"]),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            special_features: strings(&["unesco_sites", "ancient_ruins", "royal_heritage"]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer, &[]),
        );

        // 3 matches x 10 = 30, capped at 20
        assert_eq!(score, 20);
    }

    #[test]
    fn test_vibe_bonuses() {
        let cat = category(CategoryTags {
            vibe: strings(&["bucket_list", "instagram_worthy"]),
            ..CategoryTags::default()
        });

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 8);
    }

    #[test]
    fn test_global_cuisine_bonus_everywhere() {
        let cat = category(CategoryTags {
            home_region: Some("global".to_string()),
            ..CategoryTags::default()
        });

        // Even with no destination region at all
        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &DestinationTags::default(),
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 10);
    }

    #[test]
    fn test_cuisine_exact_home_region_match() {
        let cat = category(CategoryTags {
            home_region: Some("eastern_europe".to_string()),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: strings(&["eastern_europe"]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 20);
    }

    #[test]
    fn test_cuisine_neighbour_bonus_forward_direction() {
        // Turkish cuisine (middle_east) in Bulgaria (eastern_europe):
        // eastern_europe is listed as a neighbour of middle_east
        let cat = category(CategoryTags {
            home_region: Some("middle_east".to_string()),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: strings(&["eastern_europe"]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 12);
    }

    #[test]
    fn test_cuisine_neighbour_bonus_reverse_direction() {
        // pacific_islands lists southeast_asia, but southeast_asia does not
        // list pacific_islands; the bonus must come from the reverse lookup
        let cat = category(CategoryTags {
            home_region: Some("southeast_asia".to_string()),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: strings(&["pacific_islands"]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 12);
    }

    #[test]
    fn test_cuisine_unrelated_region_no_bonus() {
        let cat = category(CategoryTags {
            home_region: Some("east_asia".to_string()),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: strings(&["caribbean"]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("solo_trip", "mid_range"),
            &destination,
            &context(Season::Summer, &[]),
        );

        assert_eq!(score, 0);
    }

    #[test]
    fn test_score_clamps_to_exactly_100() {
        // Saturate every bonus: 15 + 10 + 20 + 15 + 20 + 20 + 5 + 3 + 20 = 128
        let cat = category(CategoryTags {
            trip_ideal: strings(&["romantic_couple"]),
            budget_level: strings(&["mid_range"]),
            season: strings(&["summer"]),
            season_special: strings(&["summer_festivals"]),
            tourism_characteristics: strings(&[
                "romantic_destination",
                "cultural_hub",
                "historical_city",
                "art_capital",
            ]),
            special_features: strings(&["unesco_sites", "royal_heritage"]),
            vibe: strings(&["bucket_list", "instagram_worthy"]),
            home_region: Some("western_europe".to_string()),
            ..CategoryTags::default()
        });
        let destination = DestinationTags {
            geo_region: strings(&["western_europe"]),
            tourism_characteristics: strings(&[
                "romantic_destination",
                "cultural_hub",
                "historical_city",
                "art_capital",
            ]),
            special_features: strings(&["unesco_sites", "royal_heritage"]),
            ..DestinationTags::default()
        };

        let score = relevance_score(
            &cat,
            &request("romantic_couple", "mid_range"),
            &destination,
            &context(Season::Summer, &["summer_festivals"]),
        );

        assert_eq!(score, 100);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let destination = DestinationTags {
            geo_region: strings(&["western_europe"]),
            tourism_characteristics: strings(&["cultural_hub"]),
            ..DestinationTags::default()
        };
        let empty = category(CategoryTags::default());

        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            let score = relevance_score(
                &empty,
                &request("solo_trip", "mid_range"),
                &destination,
                &context(season, &[]),
            );
            assert!(score <= 100);
        }
    }
}
