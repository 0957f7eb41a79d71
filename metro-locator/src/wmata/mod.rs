//! WMATA (Washington Metro) API client.
//!
//! Three endpoints are used:
//! - `Rail.svc/json/jStations`: every station with its code and location
//! - `Rail.svc/json/jStationTimes`: opening and last-train times per weekday
//! - `StationPrediction.svc/json/GetPrediction/{code}`: live arrivals
//!
//! Arrival estimates are free text ("3", "ARR", "BRD", "---"); they are
//! normalised by [`crate::domain::Minutes`].

mod client;
mod convert;
mod error;
mod types;

pub use client::{WmataClient, WmataConfig};
pub use convert::{ConversionError, convert_station_times, convert_stations};
pub use error::WmataError;
pub use types::{DayTimesDto, StationDto, StationTimesDto, TrainDto, TrainTimeDto};
