//! Live prediction fetching and normalisation.

use chrono::{Datelike, NaiveDateTime};
use tracing::info;

use crate::domain::{Minutes, ScheduleMap, ServiceStatus, ServiceWindow, Station};
use crate::wmata::{TrainDto, WmataClient};

use super::document::{LineMap, PredictionDocument};
use super::error::LocatorError;

/// Today's first and last train at `station`.
pub fn service_window(
    station: &Station,
    schedules: &ScheduleMap,
    now: NaiveDateTime,
) -> Result<ServiceWindow, LocatorError> {
    let weekday = now.weekday();
    let missing = || LocatorError::ScheduleMissing {
        station: station.name.clone(),
        weekday,
    };

    schedules
        .get(&station.name)
        .and_then(|week| week.day(weekday))
        .and_then(|day| day.window(now.date()))
        .ok_or_else(missing)
}

/// Group trains by line and destination, soonest arrival first.
///
/// Within a destination, trains with equal estimates keep feed order and
/// unknown estimates go last.
pub fn group_trains(trains: &[TrainDto]) -> LineMap {
    let mut by_line = LineMap::new();

    for train in trains {
        by_line
            .entry(train.line.clone())
            .or_default()
            .entry(train.destination.clone())
            .or_default()
            .push(Minutes::parse(&train.min));
    }

    for destinations in by_line.values_mut() {
        for minutes in destinations.values_mut() {
            minutes.sort();
        }
    }

    by_line
}

/// Fetch and normalise live arrivals at `station`.
///
/// Predictions are fetched whatever the time of day; the service window is
/// reported in the document and logged, but does not gate the request.
pub async fn fetch_predictions(
    client: &WmataClient,
    station: &Station,
    schedules: &ScheduleMap,
    now: NaiveDateTime,
) -> Result<PredictionDocument, LocatorError> {
    info!(station = %station.name, weekday = %now.weekday(), "checking station timings");
    let window = service_window(station, schedules, now)?;

    match window.status(now) {
        ServiceStatus::InService => {}
        ServiceStatus::BeforeFirstTrain => {
            info!(first_train = %window.first_train, "first train has not left yet")
        }
        ServiceStatus::AfterLastTrain => {
            info!(last_train = %window.last_train, "last train has already left")
        }
    }

    info!(station = %station.name, code = %station.code, "finding closest train predictions");
    let trains = client
        .get_predictions(&station.code)
        .await
        .map_err(|source| LocatorError::PredictionFetch {
            station: station.name.clone(),
            source,
        })?;

    let by_line = group_trains(&trains);
    info!(
        station = %station.name,
        lines = %by_line.keys().cloned().collect::<Vec<_>>().join(","),
        "found lines"
    );

    Ok(PredictionDocument {
        by_line,
        timestamp: now,
        first_train: window.first_train,
        last_train: window.last_train,
    })
}
