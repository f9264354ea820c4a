use serde::{Deserialize, Serialize};

/// One priced flight offer as received from the data source. Only the
/// numeric id is guaranteed; everything else is an opaque body whose shape
/// varies between feeds (flat `journeyList` vs. grouped `groupingMap`).
/// Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawItinerary {
    pub id: i64,
    #[serde(flatten)]
    pub body: serde_json::Value,
}

impl RawItinerary {
    pub fn new(id: i64, body: serde_json::Value) -> Self {
        Self { id, body }
    }
}
