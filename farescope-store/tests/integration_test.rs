use std::collections::HashSet;
use std::io::Write;

use chrono::NaiveDate;

use farescope_core::search::{
    CabinClass, FilterToggles, PassengerCounts, PassengerType, SearchCriteria, TripType,
};
use farescope_results::{FilterUpdate, ResultsController, ResultsState, StopBuckets};
use farescope_store::JsonFileItinerarySource;

fn criteria() -> SearchCriteria {
    SearchCriteria {
        trip_type: TripType::OneWay,
        from_airport: "DEL".to_string(),
        to_airport: "LHR".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        return_date: None,
        cabin_class: CabinClass::Economy,
        passengers: PassengerCounts::default(),
        preferred_airline: None,
        transit_airport: None,
        filters: FilterToggles::default(),
        passenger_type: PassengerType::General,
        city_pairs: None,
    }
}

/// End to end: JSON file on disk -> source -> controller -> filter -> page.
/// The fixture mixes flat and grouped record shapes plus one shapeless
/// record that must survive every filter.
#[tokio::test]
async fn test_load_filter_paginate_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{
                "id": 1,
                "pricingInformation": {{ "totalPriceValue": 8000 }},
                "journeyList": [ {{
                    "travelTimeMillis": 7200000,
                    "airSegmentList": [
                        {{ "carrierCode": "AI", "departureDateTime": "2026-01-15T06:10:00", "toLocation": "LHR" }}
                    ]
                }} ]
            }},
            {{
                "id": 2,
                "groupingMap": {{
                    "g1": [ {{
                        "pricingInformation": {{ "totalPriceValue": 15000 }},
                        "journeyList": [ {{
                            "travelTimeMillis": 21600000,
                            "airSegmentList": [
                                {{ "carrierCode": "6E", "departureDateTime": "2026-01-15T09:20:00", "toLocation": "DXB" }},
                                {{ "carrierCode": "6E", "arrivalDateTime": "2026-01-15T19:05:00", "toLocation": "LHR" }}
                            ]
                        }} ]
                    }} ]
                }}
            }},
            {{ "id": 3 }}
        ]"#
    )
    .unwrap();

    let source = JsonFileItinerarySource::new(file.path());
    let mut controller = ResultsController::new(criteria());

    controller.load(&source).await;
    assert_eq!(controller.state(), ResultsState::Ready);
    assert_eq!(controller.filtered_len(), 3);
    assert_eq!(controller.total_pages(), 1);

    // Non-stop bucket drops the one-stop grouped record; the shapeless
    // record stays (fail-open).
    controller.update_filter(FilterUpdate {
        stops: Some(StopBuckets { non_stop: true, ..Default::default() }),
        ..Default::default()
    });
    let ids: Vec<i64> = controller.filtered().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);

    // Avoiding DXB excludes the grouped record once stops are unrestricted.
    controller.update_filter(FilterUpdate {
        stops: Some(StopBuckets::default()),
        transit_airports: Some(HashSet::from(["DXB".to_string()])),
        ..Default::default()
    });
    let ids: Vec<i64> = controller.filtered().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let page = controller.page();
    assert_eq!(page.len(), 2);
}
