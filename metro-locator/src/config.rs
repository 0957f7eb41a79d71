//! Locator configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheStoreConfig;
use crate::geocode::GeocoderConfig;
use crate::wmata::WmataConfig;

/// One day.
pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// One (long) month.
pub const MONTH: Duration = Duration::from_secs(31 * 24 * 60 * 60);

/// Where reference-data caches live and how long each stays valid.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub geocode: CacheStoreConfig,
    pub stations: CacheStoreConfig,
    pub station_times: CacheStoreConfig,
}

impl CacheConfig {
    /// Default store files and lifetimes under `dir`.
    ///
    /// Addresses and the station list are kept for a month; operating
    /// hours for a day.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            geocode: CacheStoreConfig::new(dir.join("geocode.cache.json"), MONTH),
            stations: CacheStoreConfig::new(dir.join("stations.cache.json"), MONTH),
            station_times: CacheStoreConfig::new(dir.join("station_times.cache.json"), DAY),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Everything needed to build a [`Locator`](crate::locator::Locator).
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub wmata: WmataConfig,
    pub geocoder: GeocoderConfig,
    pub cache: CacheConfig,
}

impl LocatorConfig {
    /// Default endpoints and caches in the current directory.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            wmata: WmataConfig::new(api_key),
            geocoder: GeocoderConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Keep cache files under `dir`.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = CacheConfig::in_dir(dir);
        self
    }

    /// Apply one request timeout to every upstream call.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.wmata = self.wmata.with_timeout(secs);
        self.geocoder = self.geocoder.with_timeout(secs);
        self
    }
}
