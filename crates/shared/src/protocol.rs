use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::{FareLevel, SurchargeOption, TripState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartTripRequest {
    pub name: String,
    pub level: FareLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOptionRequest {
    pub option: SurchargeOption,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub msg: String,
}

/// Trip statistics computed by the backend. Only shown once the trip is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMeta {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub level: u32,
    pub move_rate: f64,
    pub stop_rate: f64,
    #[serde(default)]
    pub active_options: Vec<String>,
}

/// Response of `GET /api/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub fare: f64,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub state: TripState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TripMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopTripResponse {
    pub fare: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub name: String,
    pub fare: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u32),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<u32>()
            .map_err(|_| de::Error::custom(format!("invalid level '{text}'"))),
    }
}
