use async_trait::async_trait;

use crate::itinerary::RawItinerary;

/// The single asynchronous boundary of the engine: fetching the itinerary
/// collection for one results session. At most one fetch is outstanding at a
/// time; a new fetch simply replaces the previous result on completion.
#[async_trait]
pub trait ItinerarySource: Send + Sync {
    async fn fetch_itineraries(
        &self,
    ) -> Result<Vec<RawItinerary>, Box<dyn std::error::Error + Send + Sync>>;
}
