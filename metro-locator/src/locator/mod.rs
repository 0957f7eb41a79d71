//! The station locator pipeline.
//!
//! address → coordinates → nearest station → live predictions.
//!
//! Each stage fails fast with a [`LocatorError`]. Only the top-level
//! [`Locator::report`] turns a failure into an [`ErrorDocument`] that a
//! display can still render.

mod document;
mod error;
mod nearest;
mod predictions;


pub use document::{ErrorDocument, LineMap, PredictionDocument, Report};
pub use error::LocatorError;
pub use nearest::{NearestStation, find_nearest};
pub use predictions::{fetch_predictions, group_trains, service_window};

use chrono::{Local, NaiveDateTime};
use tracing::{error, info};

use crate::config::LocatorConfig;
use crate::directory::StationDirectory;
use crate::domain::{Coordinates, Station};
use crate::geocode::{Geocoder, GeocoderClient};
use crate::wmata::WmataClient;

/// Finds the station nearest an address and its live arrivals.
#[derive(Debug, Clone)]
pub struct Locator {
    geocoder: Geocoder,
    directory: StationDirectory,
}

impl Locator {
    pub fn new(geocoder: Geocoder, directory: StationDirectory) -> Self {
        Self {
            geocoder,
            directory,
        }
    }

    /// Build the clients and caches described by `config`.
    pub fn from_config(config: &LocatorConfig) -> Result<Self, LocatorError> {
        let geocoder = Geocoder::new(
            GeocoderClient::new(config.geocoder.clone())?,
            config.cache.geocode.clone(),
        );

        let wmata = WmataClient::new(config.wmata.clone()).map_err(LocatorError::DirectoryFetch)?;
        let directory = StationDirectory::new(
            wmata,
            config.cache.stations.clone(),
            config.cache.station_times.clone(),
        );

        Ok(Self::new(geocoder, directory))
    }

    /// Resolve an address to coordinates.
    pub async fn geolocate(&self, address: &str) -> Result<Coordinates, LocatorError> {
        Ok(self.geocoder.resolve(address).await?)
    }

    /// The station closest to `address`.
    pub async fn nearest_station(&self, address: &str) -> Result<Station, LocatorError> {
        let stations = self
            .directory
            .list_stations()
            .await
            .map_err(LocatorError::DirectoryFetch)?;
        let coordinates = self.geolocate(address).await?;

        let nearest = find_nearest(&coordinates, &stations)?;
        Ok(nearest.station.clone())
    }

    /// Live predictions at the station closest to `address`.
    pub async fn predict(&self, address: &str) -> Result<PredictionDocument, LocatorError> {
        self.predict_at(address, Local::now().naive_local()).await
    }

    /// As [`predict`](Self::predict), stamped with `now`.
    pub async fn predict_at(
        &self,
        address: &str,
        now: NaiveDateTime,
    ) -> Result<PredictionDocument, LocatorError> {
        let (stations, schedules) = self
            .directory
            .load()
            .await
            .map_err(LocatorError::DirectoryFetch)?;

        info!("getting current coordinates");
        let coordinates = self.geolocate(address).await?;

        info!(%coordinates, "finding closest station");
        let nearest = find_nearest(&coordinates, &stations)?;
        info!(
            station = %nearest.station.name,
            distance_miles = nearest.distance_miles,
            "found closest station"
        );

        fetch_predictions(self.directory.client(), nearest.station, &schedules, now).await
    }

    /// Run the pipeline, turning any failure into an error report.
    pub async fn report(&self, address: &str) -> Report {
        let now = Local::now().naive_local();
        match self.predict_at(address, now).await {
            Ok(doc) => Report::Predictions(doc),
            Err(e) => {
                error!(address, error = %e, "prediction pipeline failed");
                Report::error(&e, now)
            }
        }
    }
}
