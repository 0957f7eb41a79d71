//! Conversion from WMATA DTOs to domain types.

use chrono::{NaiveTime, Weekday};
use tracing::warn;

use crate::domain::{
    Coordinates, DaySchedule, ScheduleMap, Station, StationCode, WeeklySchedule,
};

use super::types::{DayTimesDto, StationDto, StationTimesDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse an "HH:MM" time
    #[error("invalid time {time:?} for {station}")]
    InvalidTime { station: String, time: String },
}

/// Convert the station list, skipping rows with malformed codes.
pub fn convert_stations(dtos: &[StationDto]) -> Vec<Station> {
    dtos.iter()
        .filter_map(|dto| match StationCode::parse(&dto.code) {
            Ok(code) => Some(Station::new(
                dto.name.clone(),
                code,
                Coordinates::new(dto.lat, dto.lon),
            )),
            Err(e) => {
                warn!(code = %dto.code, name = %dto.name, error = %e, "skipping station");
                None
            }
        })
        .collect()
}

/// Convert station times into schedules keyed by station name.
///
/// Transfer stations appear once per platform level under the same name;
/// the first usable row for a name wins. Rows with malformed times are
/// skipped, so only the affected station ends up without a schedule.
pub fn convert_station_times(dtos: &[StationTimesDto]) -> ScheduleMap {
    let mut schedules = ScheduleMap::new();

    for dto in dtos {
        if schedules.contains_key(&dto.station_name) {
            continue;
        }
        match convert_week(dto) {
            Ok(week) => {
                schedules.insert(dto.station_name.clone(), week);
            }
            Err(e) => {
                warn!(station = %dto.station_name, error = %e, "skipping station times");
            }
        }
    }

    schedules
}

fn convert_week(dto: &StationTimesDto) -> Result<WeeklySchedule, ConversionError> {
    let days = [
        (Weekday::Mon, &dto.monday),
        (Weekday::Tue, &dto.tuesday),
        (Weekday::Wed, &dto.wednesday),
        (Weekday::Thu, &dto.thursday),
        (Weekday::Fri, &dto.friday),
        (Weekday::Sat, &dto.saturday),
        (Weekday::Sun, &dto.sunday),
    ];

    let mut week = WeeklySchedule::new();
    for (weekday, day) in days {
        if let Some(day) = day {
            week.insert(weekday, convert_day(&dto.station_name, day)?);
        }
    }
    Ok(week)
}

fn convert_day(station: &str, dto: &DayTimesDto) -> Result<DaySchedule, ConversionError> {
    let opening_time = parse_hhmm(station, &dto.opening_time)?;
    let last_train_times = dto
        .last_trains
        .iter()
        .map(|train| parse_hhmm(station, &train.time))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DaySchedule::new(opening_time, last_train_times))
}

fn parse_hhmm(station: &str, time: &str) -> Result<NaiveTime, ConversionError> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| ConversionError::InvalidTime {
        station: station.to_string(),
        time: time.to_string(),
    })
}
