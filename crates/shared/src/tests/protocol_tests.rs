use crate::{
    domain::{FareLevel, SurchargeOption, TripState},
    error::DomainError,
    protocol::{HistoryRecord, LiveSnapshot, StartTripRequest, ToggleOptionRequest},
};
use serde_json::json;

#[test]
fn fare_level_rejects_values_outside_one_to_three() {
    assert_eq!(FareLevel::new(0), Err(DomainError::InvalidFareLevel(0)));
    assert_eq!(FareLevel::new(4), Err(DomainError::InvalidFareLevel(4)));
    for raw in 1..=3u8 {
        let level = FareLevel::new(raw).expect("valid level");
        assert_eq!(level.get(), raw);
        assert_eq!(level.index(), usize::from(raw - 1));
    }
    assert_eq!(FareLevel::default().get(), 1);
}

#[test]
fn start_request_serializes_level_as_number() {
    let body = serde_json::to_value(StartTripRequest {
        name: "Alice".into(),
        level: FareLevel::new(2).expect("level"),
    })
    .expect("serialize");
    assert_eq!(body, json!({ "name": "Alice", "level": 2 }));

    let err = serde_json::from_value::<StartTripRequest>(json!({ "name": "x", "level": 9 }));
    assert!(err.is_err());
}

#[test]
fn toggle_request_uses_wire_option_names() {
    let body = serde_json::to_value(ToggleOptionRequest {
        option: SurchargeOption::City,
        active: true,
    })
    .expect("serialize");
    assert_eq!(body, json!({ "option": "city", "active": true }));
    assert_eq!("night".parse::<SurchargeOption>(), Ok(SurchargeOption::Night));
    assert_eq!(
        "airport".parse::<SurchargeOption>(),
        Err(DomainError::UnknownOption("airport".into()))
    );
}

#[test]
fn snapshot_accepts_backend_shape_with_string_level_and_stop_state() {
    let snapshot: LiveSnapshot = serde_json::from_value(json!({
        "fare": 3.2,
        "state": "2",
        "is_running": true,
        "logs": [
            { "time": "10:00:05", "msg": "Taxi Stopped" },
            { "time": "10:00:00", "msg": "Trip Started (Lv.2)" }
        ],
        "meta": {
            "level": "2",
            "move_rate": 0.06,
            "stop_rate": 0.024,
            "active_options": ["Night x1.5"]
        }
    }))
    .expect("decode");

    assert_eq!(snapshot.state, TripState::Stopped);
    assert_eq!(snapshot.logs.len(), 2);
    assert_eq!(snapshot.logs[0].msg, "Taxi Stopped");
    let meta = snapshot.meta.expect("meta");
    assert_eq!(meta.level, 2);
    assert_eq!(meta.active_options, vec!["Night x1.5".to_string()]);
}

#[test]
fn snapshot_without_meta_decodes_and_moving_state_is_one() {
    let snapshot: LiveSnapshot = serde_json::from_value(json!({
        "fare": 12.5,
        "state": "1",
        "logs": []
    }))
    .expect("decode");
    assert_eq!(snapshot.state, TripState::Moving);
    assert!(snapshot.meta.is_none());
    assert!(snapshot.is_running.is_none());

    let bad_level = serde_json::from_value::<LiveSnapshot>(json!({
        "fare": 1.0,
        "state": "1",
        "meta": { "level": "two", "move_rate": 0.1, "stop_rate": 0.1 }
    }));
    assert!(bad_level.is_err());
}

#[test]
fn history_records_decode_from_backend_json() {
    let records: Vec<HistoryRecord> = serde_json::from_value(json!([
        { "date": "2024-05-01 12:00:00", "name": "Bob", "fare": 12.5 }
    ]))
    .expect("decode");
    assert_eq!(records[0].name, "Bob");
    assert_eq!(records[0].fare, 12.5);
}
