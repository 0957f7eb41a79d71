//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::display::DisplayPayload;
use crate::locator::Locator;

/// How long a rendered payload is served before predictions are refetched.
const DEFAULT_PAYLOAD_TTL: Duration = Duration::from_secs(15);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Locator pipeline
    pub locator: Arc<Locator>,

    /// Address whose nearest station is shown
    pub address: Arc<str>,

    /// Recently rendered payloads, keyed by address
    pub payloads: MokaCache<String, Arc<DisplayPayload>>,
}

impl AppState {
    pub fn new(locator: Locator, address: impl Into<Arc<str>>) -> Self {
        Self::with_payload_ttl(locator, address, DEFAULT_PAYLOAD_TTL)
    }

    pub fn with_payload_ttl(
        locator: Locator,
        address: impl Into<Arc<str>>,
        ttl: Duration,
    ) -> Self {
        let payloads = MokaCache::builder()
            .time_to_live(ttl)
            .max_capacity(16)
            .build();

        Self {
            locator: Arc::new(locator),
            address: address.into(),
            payloads,
        }
    }
}
