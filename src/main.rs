use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use tourcast::api::AppState;
use tourcast::models::{DateRange, TripRequest};
use tourcast::{
    AnthropicInference, CityIndex, DestinationResolver, TourcastConfig, catalog, ranking, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TourcastConfig::load().unwrap_or_else(|error| {
        eprintln!("Using default configuration: {error:#}");
        TourcastConfig::default()
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let state = build_state(&config)?;

    match std::env::args().nth(1).as_deref() {
        Some("demo") => run_demo(&state).await,
        _ => web::run(state, config.server.port).await,
    }
}

fn build_state(config: &TourcastConfig) -> Result<AppState> {
    let categories = catalog::load_categories(&config.data.categories_path)
        .with_context(|| "Failed to load category catalog")?;
    let catalog_raw = catalog::load_raw(&config.data.categories_path)?;
    let index = CityIndex::load(&config.data.cities_path)
        .with_context(|| "Failed to load city database")?;

    let inference = AnthropicInference::new(&config.inference)?;
    let resolver = DestinationResolver::new(index, inference);

    Ok(AppState {
        catalog: Arc::new(categories),
        catalog_raw: Arc::new(catalog_raw),
        resolver: Arc::new(resolver),
    })
}

/// Rank a fixed winter city break and print the top results
async fn run_demo(state: &AppState) -> Result<()> {
    let request = TripRequest {
        dates: DateRange {
            start: NaiveDate::from_ymd_opt(2025, 12, 20).context("invalid demo date")?,
            end: NaiveDate::from_ymd_opt(2025, 12, 27).context("invalid demo date")?,
        },
        trip_type: "romantic_couple".to_string(),
        budget: "mid_range".to_string(),
        limit: None,
    };

    let output = ranking::rank(
        &state.catalog,
        "Prague",
        "Czech Republic",
        &request,
        &state.resolver,
    )
    .await;

    println!(
        "Prague, Czech Republic - {} ({:?}), periods: {:?}",
        output.date_context.season,
        output.date_context.hemisphere,
        output.date_context.special_periods
    );

    print_bucket("Places", &output.places);
    print_bucket("Activities", &output.activities);
    print_bucket("Cuisines", &output.dining.cuisines);

    println!("\nExcluded {} categories, for example:", output.excluded_count);
    for excluded in &output.excluded_examples {
        println!("  - {}: {}", excluded.name, excluded.reason);
    }

    Ok(())
}

fn print_bucket(label: &str, items: &[ranking::RankedCategory]) {
    println!("\n{label}:");
    for item in items.iter().take(10) {
        println!(
            "  {:>3}  {} ({})",
            item.relevance_score, item.name, item.parent_category
        );
    }
}
