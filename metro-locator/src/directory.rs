//! Station directory: the station list and per-station operating hours.
//!
//! Both are reference data refreshed through their own disk caches. The
//! raw API rows are cached, not the converted domain values, so a cache
//! file is a verbatim snapshot of what WMATA returned.

use futures::future::try_join;
use tracing::info;

use crate::cache::{CacheStoreConfig, ExpiringCache, GLOBAL_KEY};
use crate::domain::{ScheduleMap, Station};
use crate::wmata::{WmataClient, WmataError, convert_station_times, convert_stations};

/// Cached access to station reference data.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    client: WmataClient,
    stations: ExpiringCache,
    station_times: ExpiringCache,
}

impl StationDirectory {
    pub fn new(
        client: WmataClient,
        stations: CacheStoreConfig,
        station_times: CacheStoreConfig,
    ) -> Self {
        Self {
            client,
            stations: ExpiringCache::new(stations),
            station_times: ExpiringCache::new(station_times),
        }
    }

    /// Every known station, in directory order.
    pub async fn list_stations(&self) -> Result<Vec<Station>, WmataError> {
        let client = &self.client;
        let rows = self
            .stations
            .get_or_compute(GLOBAL_KEY, move || async move {
                info!("getting station list");
                client.list_stations().await
            })
            .await?;

        Ok(convert_stations(&rows))
    }

    /// Operating hours for every station, keyed by station name.
    pub async fn list_schedules(&self) -> Result<ScheduleMap, WmataError> {
        let client = &self.client;
        let rows = self
            .station_times
            .get_or_compute(GLOBAL_KEY, move || async move {
                info!("getting station timings");
                client.list_station_times().await
            })
            .await?;

        Ok(convert_station_times(&rows))
    }

    /// Fetch stations and schedules concurrently.
    pub async fn load(&self) -> Result<(Vec<Station>, ScheduleMap), WmataError> {
        try_join(self.list_stations(), self.list_schedules()).await
    }

    /// Access the underlying client for live requests.
    pub fn client(&self) -> &WmataClient {
        &self.client
    }
}
