//! Station operating hours.
//!
//! Each station publishes, per weekday, the time it opens and the times of
//! its last trains. These are plain times of day; they are anchored to a
//! calendar date only when a prediction is made.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Operating hours for one station on one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    /// When the station opens.
    pub opening_time: NaiveTime,
    /// Departure times of the last trains, in feed order.
    pub last_train_times: Vec<NaiveTime>,
}

impl DaySchedule {
    pub fn new(opening_time: NaiveTime, last_train_times: Vec<NaiveTime>) -> Self {
        Self {
            opening_time,
            last_train_times,
        }
    }

    /// First train on `date`: the opening time on that date.
    pub fn first_train(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.opening_time)
    }

    /// Last train on `date`: the latest of the last-train times on that date.
    ///
    /// Returns `None` when the schedule lists no last trains.
    pub fn last_train(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.last_train_times
            .iter()
            .max()
            .map(|time| date.and_time(*time))
    }

    /// Anchor this schedule to `date`.
    pub fn window(&self, date: NaiveDate) -> Option<ServiceWindow> {
        Some(ServiceWindow {
            first_train: self.first_train(date),
            last_train: self.last_train(date)?,
        })
    }
}

/// Operating hours for one station across the week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: HashMap<Weekday, DaySchedule>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, weekday: Weekday, day: DaySchedule) {
        self.days.insert(weekday, day);
    }

    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.days.get(&weekday)
    }
}

/// Schedules for every station, keyed by station name.
pub type ScheduleMap = HashMap<String, WeeklySchedule>;

/// First and last train of one service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub first_train: NaiveDateTime,
    pub last_train: NaiveDateTime,
}

/// Where a moment falls relative to a service window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    BeforeFirstTrain,
    InService,
    AfterLastTrain,
}

impl ServiceWindow {
    pub fn status(&self, now: NaiveDateTime) -> ServiceStatus {
        if now < self.first_train {
            ServiceStatus::BeforeFirstTrain
        } else if now > self.last_train {
            ServiceStatus::AfterLastTrain
        } else {
            ServiceStatus::InService
        }
    }
}
