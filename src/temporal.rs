//! Temporal context resolution
//!
//! Pure functions turning a travel date and a destination region into
//! season, hemisphere and special-period facts. Special periods are
//! date-window rules, not real holiday computation; they only surface when
//! the destination also declares them as a seasonal feature.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::DestinationTags;

/// Meteorological season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// The season two quarters away (spring<->autumn, summer<->winter)
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Season::Spring => Season::Autumn,
            Season::Summer => Season::Winter,
            Season::Autumn => Season::Spring,
            Season::Winter => Season::Summer,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    Northern,
    Southern,
}

/// Date-derived facts for one trip, recomputed per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateContext {
    pub season: Season,
    /// Currently always equal to `season`; kept as a slot for
    /// tropical-region adjustments.
    pub adjusted_season: Season,
    /// Date-detected periods also declared by the destination
    pub special_periods: Vec<String>,
    pub hemisphere: Hemisphere,
    pub month: u32,
}

/// Calculate the season for a date in the given hemisphere
#[must_use]
pub fn season_for(date: NaiveDate, hemisphere: Hemisphere) -> Season {
    let northern = match date.month() {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    };

    match hemisphere {
        Hemisphere::Northern => northern,
        Hemisphere::Southern => northern.opposite(),
    }
}

/// Determine hemisphere from a geo_region value
///
/// A fixed lookup, not geographic computation: sub-Saharan Africa is
/// treated as wholly southern, and unrecognized regions default to northern.
#[must_use]
pub fn hemisphere_for(geo_region: &str) -> Hemisphere {
    const SOUTHERN_REGIONS: [&str; 4] = [
        "oceania",
        "pacific_islands",
        "south_america",
        "sub_saharan_africa",
    ];

    if SOUTHERN_REGIONS.contains(&geo_region) {
        Hemisphere::Southern
    } else {
        Hemisphere::Northern
    }
}

/// Detect raw special periods from a travel date
///
/// Multiple periods may co-occur. The summer_holidays window covers the
/// northern and southern school-holiday months with one tag regardless of
/// hemisphere, mislabelling southern winter months; this matches the
/// upstream date rules and is kept as-is.
#[must_use]
pub fn detect_special_periods(date: NaiveDate) -> Vec<String> {
    let mut periods = Vec::new();
    let month = date.month();
    let day = date.day();

    // Christmas period (Dec 1 - Jan 6)
    if month == 12 || (month == 1 && day <= 6) {
        periods.push("christmas_period".to_string());
    }

    // Easter: fixed late-March to late-April window, not the lunar date
    if (month == 3 && day >= 20) || (month == 4 && day <= 25) {
        periods.push("easter".to_string());
    }

    if month == 10 && day >= 25 {
        periods.push("halloween".to_string());
    }

    if matches!(month, 6..=8 | 12 | 1 | 2) {
        periods.push("summer_holidays".to_string());
    }

    periods
}

/// Build the full date context for a trip start date and destination
///
/// Hemisphere comes from the destination's first listed region (northern by
/// default); season and periods come from the start date only. Detected
/// periods are filtered to those the destination declares in
/// `seasonal_features` - a period not tagged on the destination never
/// surfaces, even if date-detected.
#[must_use]
pub fn date_context(start: NaiveDate, destination: &DestinationTags) -> DateContext {
    let region = destination
        .geo_region
        .first()
        .map_or("unknown", String::as_str);
    let hemisphere = hemisphere_for(region);
    let season = season_for(start, hemisphere);

    let special_periods = detect_special_periods(start)
        .into_iter()
        .filter(|period| destination.seasonal_features.contains(period))
        .collect();

    DateContext {
        season,
        adjusted_season: season,
        special_periods,
        hemisphere,
        month: start.month(),
    }
}
