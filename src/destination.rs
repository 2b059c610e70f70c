//! Destination resolution
//!
//! Resolves a (city, country) pair into a tag bundle: exact index lookup,
//! fuzzy lookup, AI inference with process-lifetime memoization, or a
//! deterministic fallback. Resolution never fails; every degenerate case
//! produces a usable bundle.

use crate::inference::DestinationInference;
use crate::models::{DestinationBundle, DestinationTags};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Normalize a (city, country) pair into a lookup key
///
/// Case- and whitespace-insensitive; identical trips always share a key.
#[must_use]
pub fn normalize_key(city: &str, country: &str) -> String {
    format!(
        "{}_{}",
        city.trim().to_lowercase(),
        country.trim().to_lowercase()
    )
}

/// One preloaded city entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub tags: DestinationTags,
}

impl DestinationRecord {
    /// Bundle view of a database entry
    fn to_bundle(&self) -> DestinationBundle {
        DestinationBundle {
            city: self.city.clone(),
            country: self.country.clone(),
            region: self.region.clone(),
            tags: self.tags.clone(),
            from_database: true,
            inference_confidence: None,
            notes: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CityFile {
    #[serde(default)]
    cities: Vec<DestinationRecord>,
}

/// Preloaded city index, kept in load order for deterministic fuzzy matching
#[derive(Debug, Default)]
pub struct CityIndex {
    records: Vec<DestinationRecord>,
    by_key: HashMap<String, usize>,
}

impl CityIndex {
    /// Load the index from a JSON file of the form `{"cities": [...]}`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read city database: {}", path.display()))?;
        let file: CityFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse city database: {}", path.display()))?;

        let index = Self::from_records(file.cities);
        info!("Loaded {} cities from database", index.len());
        Ok(index)
    }

    #[must_use]
    pub fn from_records(records: Vec<DestinationRecord>) -> Self {
        let by_key = records
            .iter()
            .enumerate()
            .map(|(i, record)| (normalize_key(&record.city, &record.country), i))
            .collect();

        Self { records, by_key }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order
    #[must_use]
    pub fn records(&self) -> &[DestinationRecord] {
        &self.records
    }

    fn exact(&self, key: &str) -> Option<&DestinationRecord> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    /// First entry (load order) whose city name is a substring of the query
    /// or vice versa. First-match, not best-match: with several candidates
    /// the earliest loaded entry wins.
    fn fuzzy(&self, city: &str) -> Option<&DestinationRecord> {
        let query = city.trim().to_lowercase();
        self.records.iter().find(|record| {
            let name = record.city.trim().to_lowercase();
            name.contains(&query) || query.contains(&name)
        })
    }
}

/// Resolves destinations with a process-lifetime inference cache
///
/// Owned state, created at startup and handed to the ranking pipeline. The
/// cache is append-only and keyed by normalized (city, country); concurrent
/// resolutions of the same unknown city may both call the collaborator and
/// both write the same idempotent value, which is acceptable.
pub struct DestinationResolver {
    index: CityIndex,
    inference: Box<dyn DestinationInference>,
    cache: RwLock<HashMap<String, DestinationBundle>>,
}

impl DestinationResolver {
    pub fn new(index: CityIndex, inference: impl DestinationInference + 'static) -> Self {
        Self {
            index,
            inference: Box::new(inference),
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn index(&self) -> &CityIndex {
        &self.index
    }

    /// Resolve a destination; always returns a usable bundle
    #[instrument(skip(self))]
    pub async fn resolve(&self, city: &str, country: &str) -> DestinationBundle {
        let key = normalize_key(city, country);

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&key) {
                debug!("Using cached inference for {}, {}", city, country);
                return cached.clone();
            }
        }

        if let Some(record) = self.index.exact(&key) {
            return record.to_bundle();
        }

        if let Some(record) = self.index.fuzzy(city) {
            info!("Fuzzy match: '{}' matched to '{}'", city, record.city);
            return record.to_bundle();
        }

        warn!(
            "City '{}, {}' not in database, using AI inference",
            city, country
        );

        match self.inference.infer(city, country).await {
            Ok(bundle) => {
                let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
                cache.insert(key, bundle.clone());
                bundle
            }
            Err(error) => {
                // Fallbacks bypass the cache so failed lookups retry next time
                warn!("AI inference failed: {:#}", error);
                DestinationBundle::fallback(city, country)
            }
        }
    }
}
