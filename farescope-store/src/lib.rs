pub mod app_config;
pub mod itinerary_repo;

pub use itinerary_repo::{JsonFileItinerarySource, SourceError, StaticItinerarySource};
