//! Locator pipeline error types.

use chrono::Weekday;

use crate::geocode::GeocodeError;
use crate::wmata::WmataError;

/// Errors that abort one run of the locator pipeline.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// The address could not be resolved to coordinates
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Station list or station times could not be fetched
    #[error("failed to fetch station directory: {0}")]
    DirectoryFetch(#[source] WmataError),

    /// Live predictions could not be fetched or parsed
    #[error("failed to fetch predictions for {station}: {source}")]
    PredictionFetch {
        station: String,
        #[source]
        source: WmataError,
    },

    /// No operating hours for the station on this weekday
    #[error("no schedule for {station} on {weekday}")]
    ScheduleMissing { station: String, weekday: Weekday },

    /// The station directory has no stations
    #[error("station directory is empty")]
    EmptyDirectory,
}
