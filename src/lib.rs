//! Tourcast - context-aware tourism category filtering and ranking
//!
//! This library turns a pre-tagged catalog of tourism categories plus a
//! destination and travel dates into ranked recommendation lists: hard
//! filters remove impossible matches, an additive scorer ranks the rest,
//! and unknown destinations resolve through a cached AI inference step
//! with a deterministic fallback.

pub mod api;
pub mod catalog;
pub mod config;
pub mod destination;
pub mod error;
pub mod filter;
pub mod inference;
pub mod models;
pub mod ranking;
pub mod scoring;
pub mod temporal;
pub mod web;

// Re-export core types for public API
pub use catalog::load_categories;
pub use config::TourcastConfig;
pub use destination::{CityIndex, DestinationResolver};
pub use error::TourcastError;
pub use inference::{AnthropicInference, DestinationInference};
pub use models::{Category, DestinationBundle, TripRequest};
pub use ranking::{RankedOutput, rank};
pub use temporal::{DateContext, Season, date_context};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourcastError>;
