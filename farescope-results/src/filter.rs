use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use farescope_core::search::SearchCriteria;

use crate::normalize::NormalizedAttributes;

/// Stop-count buckets, OR'd together. With no bucket selected the stops
/// predicate passes everything.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StopBuckets {
    pub non_stop: bool,
    pub one_stop: bool,
    pub two_plus_stops: bool,
}

impl StopBuckets {
    pub fn any_selected(&self) -> bool {
        self.non_stop || self.one_stop || self.two_plus_stops
    }
}

/// Inclusive minute-of-day range, full day by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinuteWindow {
    pub start: u32,
    pub end: u32,
}

impl MinuteWindow {
    pub fn contains(&self, minute: u32) -> bool {
        self.start <= minute && minute <= self.end
    }
}

impl Default for MinuteWindow {
    fn default() -> Self {
        Self { start: 0, end: 1439 }
    }
}

/// How the transit-airport set is interpreted. `Avoid` (the default)
/// excludes itineraries connecting through any listed airport; `Via`
/// keeps only itineraries connecting through at least one of them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitAirportPolicy {
    #[default]
    Avoid,
    Via,
}

/// Active filter state. Defaults accept every itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    pub stops: StopBuckets,
    pub fare_min: f64,
    /// `None` = unbounded.
    pub fare_max: Option<f64>,
    pub duration_min: i64,
    /// `None` = unbounded.
    pub duration_max: Option<i64>,
    pub departure_window: MinuteWindow,
    pub arrival_window: MinuteWindow,
    /// Empty = all airlines allowed.
    pub allowed_airlines: HashSet<String>,
    /// Empty = no transit constraint.
    pub transit_airports: HashSet<String>,
    pub transit_policy: TransitAirportPolicy,
}

impl FilterConfig {
    /// Seeds the initial filter state from the search form: the non-stop
    /// toggle, the preferred airline, and the transit airport to avoid.
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut config = Self::default();
        if criteria.filters.non_stop {
            config.stops.non_stop = true;
        }
        if let Some(airline) = &criteria.preferred_airline {
            config.allowed_airlines.insert(airline.clone());
        }
        if let Some(airport) = &criteria.transit_airport {
            config.transit_airports.insert(airport.clone());
        }
        config
    }
}

/// Partial filter change; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterUpdate {
    pub stops: Option<StopBuckets>,
    pub fare_range: Option<(f64, Option<f64>)>,
    pub duration_range: Option<(i64, Option<i64>)>,
    pub departure_window: Option<MinuteWindow>,
    pub arrival_window: Option<MinuteWindow>,
    pub allowed_airlines: Option<HashSet<String>>,
    pub transit_airports: Option<HashSet<String>>,
    pub transit_policy: Option<TransitAirportPolicy>,
}

/// Evaluates the conjunction of the six filter predicates. Every predicate
/// is fail-open: an itinerary whose shape lacked the attribute passes.
pub struct FilterEngine {
    config: FilterConfig,
}

impl FilterEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Merges a partial change into the active configuration.
    pub fn apply(&mut self, update: FilterUpdate) {
        let config = &mut self.config;
        if let Some(stops) = update.stops {
            config.stops = stops;
        }
        if let Some((min, max)) = update.fare_range {
            config.fare_min = min;
            config.fare_max = max;
        }
        if let Some((min, max)) = update.duration_range {
            config.duration_min = min;
            config.duration_max = max;
        }
        if let Some(window) = update.departure_window {
            config.departure_window = window;
        }
        if let Some(window) = update.arrival_window {
            config.arrival_window = window;
        }
        if let Some(airlines) = update.allowed_airlines {
            config.allowed_airlines = airlines;
        }
        if let Some(airports) = update.transit_airports {
            config.transit_airports = airports;
        }
        if let Some(policy) = update.transit_policy {
            config.transit_policy = policy;
        }
    }

    pub fn passes(&self, attrs: &NormalizedAttributes) -> bool {
        self.stops_pass(attrs)
            && self.fare_passes(attrs)
            && self.duration_passes(attrs)
            && self.departure_passes(attrs)
            && self.arrival_passes(attrs)
            && self.airlines_pass(attrs)
            && self.transit_passes(attrs)
    }

    fn stops_pass(&self, attrs: &NormalizedAttributes) -> bool {
        if !self.config.stops.any_selected() {
            return true;
        }
        match attrs.stops {
            None => true,
            Some(0) => self.config.stops.non_stop,
            Some(1) => self.config.stops.one_stop,
            Some(_) => self.config.stops.two_plus_stops,
        }
    }

    fn fare_passes(&self, attrs: &NormalizedAttributes) -> bool {
        match attrs.fare_amount {
            None => true,
            Some(fare) => {
                fare >= self.config.fare_min
                    && self.config.fare_max.map_or(true, |max| fare <= max)
            }
        }
    }

    fn duration_passes(&self, attrs: &NormalizedAttributes) -> bool {
        match attrs.duration_minutes {
            None => true,
            Some(minutes) => {
                minutes >= self.config.duration_min
                    && self.config.duration_max.map_or(true, |max| minutes <= max)
            }
        }
    }

    fn departure_passes(&self, attrs: &NormalizedAttributes) -> bool {
        attrs
            .departure_minute_of_day
            .map_or(true, |m| self.config.departure_window.contains(m))
    }

    fn arrival_passes(&self, attrs: &NormalizedAttributes) -> bool {
        attrs
            .arrival_minute_of_day
            .map_or(true, |m| self.config.arrival_window.contains(m))
    }

    fn airlines_pass(&self, attrs: &NormalizedAttributes) -> bool {
        if self.config.allowed_airlines.is_empty() {
            return true;
        }
        // Airline set may legitimately be empty on a shape-poor record
        if attrs.airline_codes.is_empty() {
            return true;
        }
        attrs
            .airline_codes
            .iter()
            .any(|code| self.config.allowed_airlines.contains(code))
    }

    fn transit_passes(&self, attrs: &NormalizedAttributes) -> bool {
        if self.config.transit_airports.is_empty() {
            return true;
        }
        let touches = attrs
            .transit_airport_codes
            .iter()
            .any(|code| self.config.transit_airports.contains(code));
        match self.config.transit_policy {
            TransitAirportPolicy::Avoid => !touches,
            TransitAirportPolicy::Via => attrs.transit_airport_codes.is_empty() || touches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_attrs() -> NormalizedAttributes {
        NormalizedAttributes {
            stops: None,
            fare_amount: None,
            duration_minutes: None,
            departure_minute_of_day: None,
            arrival_minute_of_day: None,
            airline_codes: HashSet::new(),
            transit_airport_codes: HashSet::new(),
        }
    }

    fn full_attrs() -> NormalizedAttributes {
        NormalizedAttributes {
            stops: Some(1),
            fare_amount: Some(15000.0),
            duration_minutes: Some(155),
            departure_minute_of_day: Some(8 * 60 + 30),
            arrival_minute_of_day: Some(13 * 60 + 45),
            airline_codes: HashSet::from(["6E".to_string(), "AI".to_string()]),
            transit_airport_codes: HashSet::from(["DXB".to_string()]),
        }
    }

    #[test]
    fn test_default_config_accepts_everything() {
        let engine = FilterEngine::new(FilterConfig::default());
        assert!(engine.passes(&empty_attrs()));
        assert!(engine.passes(&full_attrs()));
    }

    #[test]
    fn test_shapeless_record_passes_any_config() {
        let engine = FilterEngine::new(FilterConfig {
            stops: StopBuckets { non_stop: true, ..Default::default() },
            fare_min: 1.0,
            fare_max: Some(2.0),
            duration_min: 1,
            duration_max: Some(2),
            departure_window: MinuteWindow { start: 600, end: 601 },
            arrival_window: MinuteWindow { start: 600, end: 601 },
            allowed_airlines: HashSet::from(["UK".to_string()]),
            transit_airports: HashSet::from(["DXB".to_string()]),
            transit_policy: TransitAirportPolicy::Avoid,
        });
        assert!(engine.passes(&empty_attrs()));
    }

    #[test]
    fn test_stop_buckets() {
        let mut attrs = full_attrs();
        attrs.stops = Some(2);

        let two_plus = FilterEngine::new(FilterConfig {
            stops: StopBuckets { two_plus_stops: true, ..Default::default() },
            ..Default::default()
        });
        assert!(two_plus.passes(&attrs));

        let non_stop_only = FilterEngine::new(FilterConfig {
            stops: StopBuckets { non_stop: true, ..Default::default() },
            ..Default::default()
        });
        assert!(!non_stop_only.passes(&attrs));

        // No bucket selected passes everything
        let none = FilterEngine::new(FilterConfig::default());
        assert!(none.passes(&attrs));
    }

    #[test]
    fn test_fare_range() {
        let attrs = full_attrs(); // fare 15000
        let tight = FilterEngine::new(FilterConfig {
            fare_max: Some(10_000.0),
            ..Default::default()
        });
        assert!(!tight.passes(&attrs));

        let wide = FilterEngine::new(FilterConfig {
            fare_max: Some(20_000.0),
            ..Default::default()
        });
        assert!(wide.passes(&attrs));
    }

    #[test]
    fn test_time_windows() {
        let attrs = full_attrs(); // departs 08:30
        let morning = FilterEngine::new(FilterConfig {
            departure_window: MinuteWindow { start: 6 * 60, end: 12 * 60 },
            ..Default::default()
        });
        assert!(morning.passes(&attrs));

        let evening = FilterEngine::new(FilterConfig {
            departure_window: MinuteWindow { start: 18 * 60, end: 1439 },
            ..Default::default()
        });
        assert!(!evening.passes(&attrs));
    }

    #[test]
    fn test_airline_allow_list_intersects() {
        let attrs = full_attrs(); // {6E, AI}
        let with_ai = FilterEngine::new(FilterConfig {
            allowed_airlines: HashSet::from(["AI".to_string()]),
            ..Default::default()
        });
        assert!(with_ai.passes(&attrs));

        let with_uk = FilterEngine::new(FilterConfig {
            allowed_airlines: HashSet::from(["UK".to_string()]),
            ..Default::default()
        });
        assert!(!with_uk.passes(&attrs));
    }

    #[test]
    fn test_transit_avoid_and_via() {
        let attrs = full_attrs(); // connects via DXB

        let avoid_dxb = FilterEngine::new(FilterConfig {
            transit_airports: HashSet::from(["DXB".to_string()]),
            ..Default::default()
        });
        assert!(!avoid_dxb.passes(&attrs));

        let via_dxb = FilterEngine::new(FilterConfig {
            transit_airports: HashSet::from(["DXB".to_string()]),
            transit_policy: TransitAirportPolicy::Via,
            ..Default::default()
        });
        assert!(via_dxb.passes(&attrs));

        let via_ist = FilterEngine::new(FilterConfig {
            transit_airports: HashSet::from(["IST".to_string()]),
            transit_policy: TransitAirportPolicy::Via,
            ..Default::default()
        });
        assert!(!via_ist.passes(&attrs));

        // Non-stop itineraries are untouched by either policy
        let mut non_stop = full_attrs();
        non_stop.transit_airport_codes.clear();
        assert!(avoid_dxb.passes(&non_stop));
        assert!(via_ist.passes(&non_stop));
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut engine = FilterEngine::new(FilterConfig {
            fare_min: 100.0,
            fare_max: Some(500.0),
            ..Default::default()
        });

        engine.apply(FilterUpdate {
            allowed_airlines: Some(HashSet::from(["AI".to_string()])),
            ..Default::default()
        });

        assert_eq!(engine.config().fare_min, 100.0);
        assert_eq!(engine.config().fare_max, Some(500.0));
        assert!(engine.config().allowed_airlines.contains("AI"));

        engine.apply(FilterUpdate {
            fare_range: Some((0.0, None)),
            ..Default::default()
        });
        assert_eq!(engine.config().fare_max, None);
    }
}
