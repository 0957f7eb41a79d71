//! Nearest-station search.

use crate::domain::{Coordinates, Station};

use super::error::LocatorError;

/// The closest station to a point.
#[derive(Debug, Clone, Copy)]
pub struct NearestStation<'a> {
    pub station: &'a Station,
    pub distance_miles: f64,
}

/// Find the station geodesically closest to `coordinates`.
///
/// A linear scan; on equal distances the station that appears first in
/// `stations` wins.
pub fn find_nearest<'a>(
    coordinates: &Coordinates,
    stations: &'a [Station],
) -> Result<NearestStation<'a>, LocatorError> {
    let mut nearest: Option<NearestStation<'a>> = None;

    for station in stations {
        let distance_miles = station.coordinates.geodesic_miles(coordinates);
        let closer = nearest.is_none_or(|best| distance_miles < best.distance_miles);
        if closer {
            nearest = Some(NearestStation {
                station,
                distance_miles,
            });
        }
    }

    nearest.ok_or(LocatorError::EmptyDirectory)
}
