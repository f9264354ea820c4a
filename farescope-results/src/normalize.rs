use std::collections::HashSet;

use chrono::Timelike;
use serde_json::Value;

use farescope_core::format;
use farescope_core::itinerary::RawItinerary;

use crate::extract::Step::{Index, Key};
use crate::extract::{get_nested, nested_f64};

/// Canonical attributes derived from one raw itinerary. `None` (or an empty
/// set) means the record's shape did not carry the attribute; filter
/// predicates treat that as a pass, never an exclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAttributes {
    pub stops: Option<u32>,
    pub fare_amount: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub departure_minute_of_day: Option<u32>,
    pub arrival_minute_of_day: Option<u32>,
    pub airline_codes: HashSet<String>,
    pub transit_airport_codes: HashSet<String>,
}

impl NormalizedAttributes {
    pub fn departure_display(&self) -> Option<String> {
        self.departure_minute_of_day.map(format::format_time_of_day)
    }

    pub fn arrival_display(&self) -> Option<String> {
        self.arrival_minute_of_day.map(format::format_time_of_day)
    }

    pub fn duration_display(&self) -> Option<String> {
        self.duration_minutes.map(format::format_duration)
    }

    pub fn fare_display(&self) -> Option<String> {
        self.fare_amount.map(format::format_fare)
    }
}

/// Derives all attributes for one itinerary. Pure; the record is never
/// mutated, and attributes are independent of each other.
pub fn normalize(itin: &RawItinerary) -> NormalizedAttributes {
    let body = &itin.body;
    let leg = first_leg(body);
    let segments = air_segments(body);

    NormalizedAttributes {
        stops: compute_stops(leg, segments),
        fare_amount: compute_fare(body),
        duration_minutes: compute_duration_minutes(leg),
        departure_minute_of_day: segments
            .first()
            .and_then(|seg| segment_time(seg, "departureDateTime", "departureTime")),
        arrival_minute_of_day: segments
            .last()
            .and_then(|seg| segment_time(seg, "arrivalDateTime", "arrivalTime")),
        airline_codes: extract_airlines(segments),
        transit_airport_codes: extract_transit_airports(segments),
    }
}

/// The first journey of the itinerary. Feeds deliver either a grouped shape
/// (`groupingMap` keyed by compare-group, first key wins) or a flat shape
/// with `journeyList` at the top level.
pub fn first_leg(body: &Value) -> Option<&Value> {
    if let Some(grouping) = body.get("groupingMap").and_then(Value::as_object) {
        if !grouping.is_empty() {
            let first_group = grouping.values().next()?;
            return get_nested(first_group, &[Index(0), Key("journeyList"), Index(0)]);
        }
    }
    get_nested(body, &[Key("journeyList"), Index(0)])
}

/// Segments of the first leg, or an empty slice when the leg (or its
/// segment list) is missing.
pub fn air_segments(body: &Value) -> &[Value] {
    first_leg(body)
        .and_then(|leg| leg.get("airSegmentList"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Explicit `noOfStops` wins; otherwise segment count - 1; `None` when the
/// record carries neither.
fn compute_stops(leg: Option<&Value>, segments: &[Value]) -> Option<u32> {
    if let Some(n) = leg.and_then(|l| l.get("noOfStops")).and_then(Value::as_i64) {
        return Some(n.max(0) as u32);
    }
    if segments.is_empty() {
        None
    } else {
        Some((segments.len() - 1) as u32)
    }
}

/// Total price, either at the top level or inside the first grouped entry.
fn compute_fare(body: &Value) -> Option<f64> {
    if let Some(fare) = nested_f64(body, &[Key("pricingInformation"), Key("totalPriceValue")]) {
        return Some(fare);
    }
    let first_group = body
        .get("groupingMap")
        .and_then(Value::as_object)?
        .values()
        .next()?;
    nested_f64(
        first_group,
        &[Index(0), Key("pricingInformation"), Key("totalPriceValue")],
    )
}

fn compute_duration_minutes(leg: Option<&Value>) -> Option<i64> {
    let millis = leg?.get("travelTimeMillis")?.as_f64()?;
    Some((millis / 60_000.0).round() as i64)
}

fn segment_time(segment: &Value, key: &str, fallback_key: &str) -> Option<u32> {
    let ts = segment
        .get(key)
        .and_then(Value::as_str)
        .or_else(|| segment.get(fallback_key).and_then(Value::as_str))?;
    minute_of_day(ts)
}

/// Minute-of-day of the timestamp's own wall clock. No timezone conversion:
/// "2026-01-15T08:30:00+04:00" is 08:30 regardless of the offset.
fn minute_of_day(ts: &str) -> Option<u32> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        return Some(dt.hour() * 60 + dt.minute());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(dt.hour() * 60 + dt.minute());
        }
    }
    None
}

/// Marketing carrier per segment, falling back to the operating carrier.
fn extract_airlines(segments: &[Value]) -> HashSet<String> {
    segments
        .iter()
        .filter_map(|seg| {
            seg.get("carrierCode")
                .and_then(Value::as_str)
                .or_else(|| seg.get("operatingCarrierCode").and_then(Value::as_str))
        })
        .map(str::to_string)
        .collect()
}

/// Connection points: `toLocation` of every segment except the last.
/// Non-stop itineraries have none.
fn extract_transit_airports(segments: &[Value]) -> HashSet<String> {
    if segments.len() < 2 {
        return HashSet::new();
    }
    segments[..segments.len() - 1]
        .iter()
        .filter_map(|seg| seg.get("toLocation").and_then(location_code))
        .map(str::to_string)
        .collect()
}

/// Locations arrive either as a bare IATA string or as an object with a
/// `locationCode` (some feeds: `code`) field.
fn location_code(location: &Value) -> Option<&str> {
    location.as_str().or_else(|| {
        location
            .get("locationCode")
            .and_then(Value::as_str)
            .or_else(|| location.get("code").and_then(Value::as_str))
    })
}
