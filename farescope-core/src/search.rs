use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDate;

use crate::{CoreError, CoreResult};

pub const MAX_ADULTS: u8 = 9;
pub const MAX_CHILDREN: u8 = 8;
pub const MIN_CITY_PAIRS: usize = 2;
pub const MAX_CITY_PAIRS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    OneWay,
    RoundTrip,
    MultiCity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PassengerType {
    General,
    Seamen,
}

/// Adult/child/infant counts with booking-rule bounds enforced at
/// construction: 1..=9 adults, 0..=8 children, infants never exceed adults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerCounts {
    adult: u8,
    child: u8,
    infant: u8,
}

impl PassengerCounts {
    pub fn new(adult: u8, child: u8, infant: u8) -> CoreResult<Self> {
        if adult < 1 || adult > MAX_ADULTS {
            return Err(CoreError::ValidationError(format!(
                "adult count must be 1..={}, got {}",
                MAX_ADULTS, adult
            )));
        }
        if child > MAX_CHILDREN {
            return Err(CoreError::ValidationError(format!(
                "child count must be 0..={}, got {}",
                MAX_CHILDREN, child
            )));
        }
        if infant > adult {
            return Err(CoreError::ValidationError(format!(
                "infant count ({}) exceeds adult count ({})",
                infant, adult
            )));
        }
        Ok(Self { adult, child, infant })
    }

    pub fn adult(&self) -> u8 {
        self.adult
    }

    pub fn child(&self) -> u8 {
        self.child
    }

    pub fn infant(&self) -> u8 {
        self.infant
    }

    pub fn total(&self) -> u32 {
        self.adult as u32 + self.child as u32 + self.infant as u32
    }
}

impl Default for PassengerCounts {
    fn default() -> Self {
        Self { adult: 1, child: 0, infant: 0 }
    }
}

/// Quick-toggle filters carried on the search form.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterToggles {
    pub refundable: bool,
    pub non_stop: bool,
    pub split_ticket: bool,
}

/// One leg of a multi-city search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityPair {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub arrival_date: Option<NaiveDate>,
}

/// User search intent, produced by the search form and consumed read-only
/// by the results stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCriteria {
    pub trip_type: TripType,
    pub from_airport: String,
    pub to_airport: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub cabin_class: CabinClass,
    pub passengers: PassengerCounts,
    pub preferred_airline: Option<String>,
    pub transit_airport: Option<String>,
    pub filters: FilterToggles,
    pub passenger_type: PassengerType,
    pub city_pairs: Option<Vec<CityPair>>,
}

impl SearchCriteria {
    /// Cross-field rules the form cannot express per-field.
    pub fn validate(&self) -> CoreResult<()> {
        if self.trip_type == TripType::RoundTrip {
            if self.passenger_type == PassengerType::Seamen {
                return Err(CoreError::ValidationError(
                    "round trips are not available for seamen fares".to_string(),
                ));
            }
            if self.return_date.is_none() {
                return Err(CoreError::ValidationError(
                    "round trip requires a return date".to_string(),
                ));
            }
        }
        if self.trip_type == TripType::MultiCity {
            let pairs = self.city_pairs.as_deref().unwrap_or(&[]);
            if pairs.len() < MIN_CITY_PAIRS || pairs.len() > MAX_CITY_PAIRS {
                return Err(CoreError::ValidationError(format!(
                    "multi-city requires {}..={} city pairs, got {}",
                    MIN_CITY_PAIRS,
                    MAX_CITY_PAIRS,
                    pairs.len()
                )));
            }
        }
        Ok(())
    }

    pub fn total_passengers(&self) -> u32 {
        self.passengers.total()
    }

    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::RoundTrip
    }

    pub fn is_multi_city(&self) -> bool {
        self.trip_type == TripType::MultiCity
    }

    /// One-line description for the results header, e.g.
    /// "DEL → DXB • 15-Jan-2026 • 2 passengers".
    pub fn summary(&self) -> String {
        let passengers = self.total_passengers();
        format!(
            "{} → {} • {} • {} passenger{}",
            self.from_airport,
            self.to_airport,
            crate::format::format_date(self.departure_date),
            passengers,
            if passengers == 1 { "" } else { "s" }
        )
    }
}

/// Session-scoped owner of the current search. Set once per submission,
/// read by the results stage, cleared on an explicit new search.
#[derive(Debug, Default)]
pub struct CriteriaHolder {
    current: Option<(Uuid, SearchCriteria)>,
}

impl CriteriaHolder {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Validates and stores the criteria, returning the new session id.
    pub fn set(&mut self, criteria: SearchCriteria) -> CoreResult<Uuid> {
        criteria.validate()?;
        let session_id = Uuid::new_v4();
        tracing::info!("Search session {} started: {}", session_id, criteria.summary());
        self.current = Some((session_id, criteria));
        Ok(session_id)
    }

    pub fn get(&self) -> Option<&SearchCriteria> {
        self.current.as_ref().map(|(_, c)| c)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
