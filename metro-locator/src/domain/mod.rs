//! Domain types for the station locator.
//!
//! These types represent validated transit data. Raw API responses are
//! converted into them at the client boundary, so code that receives a
//! `Station` or `Minutes` can trust its shape.

mod coordinates;
mod minutes;
mod schedule;
mod station;

pub use coordinates::Coordinates;
pub use minutes::Minutes;
pub use schedule::{DaySchedule, ScheduleMap, ServiceStatus, ServiceWindow, WeeklySchedule};
pub use station::{InvalidStationCode, Station, StationCode};
