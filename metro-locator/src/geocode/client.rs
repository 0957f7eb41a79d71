//! Nominatim (OpenStreetMap) search client.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinates;

use super::error::GeocodeError;

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const DEFAULT_USER_AGENT: &str = concat!("metro-locator/", env!("CARGO_PKG_VERSION"));

/// A search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct PlaceDto {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL for the API
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
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

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocoderClient {
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the best match for a free-text address.
    pub async fn search(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places: Vec<PlaceDto> = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch(address.to_string()))?;

        debug!(
            address,
            display_name = place.display_name.as_deref().unwrap_or(""),
            "geocoder match"
        );

        parse_place(&place)
    }
}

fn parse_place(place: &PlaceDto) -> Result<Coordinates, GeocodeError> {
    let parse = |field: &str, value: &str| {
        value.trim().parse::<f64>().map_err(|_| GeocodeError::Json {
            message: format!("invalid {field} {value:?}"),
        })
    };

    Ok(Coordinates::new(
        parse("lat", &place.lat)?,
        parse("lon", &place.lon)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeocoderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("metro-locator/"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn parse_string_coordinates() {
        let places: Vec<PlaceDto> = serde_json::from_str(
            r#"[{"place_id": 1, "lat": "38.9029", "lon": "-77.0011", "display_name": "300 M St NE"}]"#,
        )
        .unwrap();
        let coords = parse_place(&places[0]).unwrap();
        assert_eq!(coords, Coordinates::new(38.9029, -77.0011));
    }

    #[test]
    fn malformed_coordinate_is_json_error() {
        let place = PlaceDto {
            lat: "north".to_string(),
            lon: "-77.0".to_string(),
            display_name: None,
        };
        let err = parse_place(&place).unwrap_err();
        assert!(matches!(err, GeocodeError::Json { .. }));
    }
}
