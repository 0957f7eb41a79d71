//! WMATA Rail API response DTOs.
//!
//! These types map directly to the JSON returned by the `Rail.svc` and
//! `StationPrediction.svc` endpoints. They are also the form persisted in
//! the reference-data caches, so they serialize back to the same shape.

use serde::{Deserialize, Serialize};

/// Response from `jStations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationsResponse {
    pub stations: Vec<StationDto>,
}

/// A station from `jStations`.
///
/// Only the fields the locator needs are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationDto {
    /// Station code, e.g. "A01".
    pub code: String,
    /// Station name, e.g. "Metro Center".
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Response from `jStationTimes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationTimesResponse {
    pub station_times: Vec<StationTimesDto>,
}

/// Operating hours for one station across the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationTimesDto {
    pub code: Option<String>,
    pub station_name: String,
    pub monday: Option<DayTimesDto>,
    pub tuesday: Option<DayTimesDto>,
    pub wednesday: Option<DayTimesDto>,
    pub thursday: Option<DayTimesDto>,
    pub friday: Option<DayTimesDto>,
    pub saturday: Option<DayTimesDto>,
    pub sunday: Option<DayTimesDto>,
}

/// Operating hours for one station on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayTimesDto {
    /// Station opening time, "HH:MM".
    pub opening_time: String,
    #[serde(default)]
    pub last_trains: Vec<TrainTimeDto>,
}

/// A scheduled train time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainTimeDto {
    /// Departure time, "HH:MM".
    pub time: String,
    pub destination_station: Option<String>,
}

/// Response from `GetPrediction/{code}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredictionsResponse {
    pub trains: Vec<TrainDto>,
}

/// A live arrival prediction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainDto {
    /// Line code, e.g. "RD". "--" for non-revenue trains.
    pub line: String,
    /// Abbreviated destination name, e.g. "Glenmont".
    pub destination: String,
    /// Minutes to arrival: a number, "ARR", "BRD", or free text.
    pub min: String,
    pub car: Option<String>,
    pub location_code: Option<String>,
}
