//! WMATA Rail HTTP client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::StationCode;

use super::error::WmataError;
use super::types::{
    PredictionsResponse, StationDto, StationTimesDto, StationTimesResponse, StationsResponse,
    TrainDto,
};

/// Default base URL for the WMATA API.
const DEFAULT_BASE_URL: &str = "https://api.wmata.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the WMATA client.
#[derive(Debug, Clone)]
pub struct WmataConfig {
    /// API key, sent in the `api_key` header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WmataConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the WMATA Rail and real-time prediction APIs.
#[derive(Debug, Clone)]
pub struct WmataClient {
    http: reqwest::Client,
    base_url: String,
}

impl WmataClient {
    /// Create a new WMATA client with the given configuration.
    pub fn new(config: WmataConfig) -> Result<Self, WmataError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| WmataError::InvalidApiKey)?;
        headers.insert(HeaderName::from_static("api_key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every rail station.
    pub async fn list_stations(&self) -> Result<Vec<StationDto>, WmataError> {
        let url = format!("{}/Rail.svc/json/jStations", self.base_url);
        let response: StationsResponse = self.get_json(&url).await?;
        Ok(response.stations)
    }

    /// Fetch opening hours and last-train times for every station.
    pub async fn list_station_times(&self) -> Result<Vec<StationTimesDto>, WmataError> {
        let url = format!("{}/Rail.svc/json/jStationTimes", self.base_url);
        let response: StationTimesResponse = self.get_json(&url).await?;
        Ok(response.station_times)
    }

    /// Fetch live arrival predictions for one station.
    pub async fn get_predictions(&self, code: &StationCode) -> Result<Vec<TrainDto>, WmataError> {
        let url = format!(
            "{}/StationPrediction.svc/json/GetPrediction/{}",
            self.base_url,
            code.as_str()
        );
        let response: PredictionsResponse = self.get_json(&url).await?;
        Ok(response.trains)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WmataError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(WmataError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WmataError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WmataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| WmataError::Json {
            message: e.to_string(),
        })
    }
}
