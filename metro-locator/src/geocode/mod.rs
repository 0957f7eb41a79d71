//! Address geocoding.
//!
//! Resolves a free-text address to coordinates through Nominatim. Results
//! are cached on disk keyed by the literal address string, so the same
//! address is only looked up once per cache window.

mod client;
mod error;

pub use client::{GeocoderClient, GeocoderConfig};
pub use error::GeocodeError;

use tracing::info;

use crate::cache::{CacheStoreConfig, ExpiringCache};
use crate::domain::Coordinates;

/// Cached address resolution.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: GeocoderClient,
    cache: ExpiringCache,
}

impl Geocoder {
    pub fn new(client: GeocoderClient, cache: CacheStoreConfig) -> Self {
        Self {
            client,
            cache: ExpiringCache::new(cache),
        }
    }

    /// Resolve `address` to coordinates.
    ///
    /// The address is used verbatim as the cache key; differently cased or
    /// spaced spellings are looked up separately.
    pub async fn resolve(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let client = &self.client;
        let coordinates = self
            .cache
            .get_or_compute(address, move || async move {
                info!(address, "loading coordinates");
                client.search(address).await
            })
            .await?;

        info!(address, %coordinates, "resolved address");
        Ok(coordinates)
    }
}
