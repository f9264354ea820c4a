use async_trait::async_trait;
use std::error::Error;
use std::path::PathBuf;

use farescope_core::itinerary::RawItinerary;
use farescope_core::repository::ItinerarySource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read itinerary data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Itinerary data is not a valid JSON array: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static itinerary collection on disk, fetched once per results session.
pub struct JsonFileItinerarySource {
    path: PathBuf,
}

impl JsonFileItinerarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<Vec<RawItinerary>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.display().to_string(),
                source: e,
            })?;
        let itineraries: Vec<RawItinerary> = serde_json::from_str(&raw)?;
        Ok(itineraries)
    }
}

#[async_trait]
impl ItinerarySource for JsonFileItinerarySource {
    async fn fetch_itineraries(
        &self,
    ) -> Result<Vec<RawItinerary>, Box<dyn Error + Send + Sync>> {
        match self.read().await {
            Ok(itineraries) => {
                tracing::info!(
                    "Read {} itineraries from {}",
                    itineraries.len(),
                    self.path.display()
                );
                Ok(itineraries)
            }
            Err(e) => {
                tracing::error!("Itinerary source failed: {}", e);
                Err(Box::new(e))
            }
        }
    }
}

/// In-memory collection, for demos and tests.
pub struct StaticItinerarySource {
    itineraries: Vec<RawItinerary>,
}

impl StaticItinerarySource {
    pub fn new(itineraries: Vec<RawItinerary>) -> Self {
        Self { itineraries }
    }
}

#[async_trait]
impl ItinerarySource for StaticItinerarySource {
    async fn fetch_itineraries(
        &self,
    ) -> Result<Vec<RawItinerary>, Box<dyn Error + Send + Sync>> {
        Ok(self.itineraries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "id": 1, "pricingInformation": {{ "totalPriceValue": 12000 }} }},
                {{ "id": 2, "journeyList": [] }}
            ]"#
        )
        .unwrap();

        let source = JsonFileItinerarySource::new(file.path());
        let itineraries = source.fetch_itineraries().await.unwrap();
        assert_eq!(itineraries.len(), 2);
        assert_eq!(itineraries[0].id, 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error_not_a_panic() {
        let source = JsonFileItinerarySource::new("/nonexistent/itineraries.json");
        assert!(source.fetch_itineraries().await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let source = JsonFileItinerarySource::new(file.path());
        assert!(source.fetch_itineraries().await.is_err());
    }

    #[tokio::test]
    async fn test_static_source_round_trips() {
        let source = StaticItinerarySource::new(vec![RawItinerary::new(
            5,
            serde_json::json!({ "journeyList": [] }),
        )]);
        let itineraries = source.fetch_itineraries().await.unwrap();
        assert_eq!(itineraries[0].id, 5);
    }
}
