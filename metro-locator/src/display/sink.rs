//! Push payloads to the ESP32 driving the LED matrix.

use std::time::Duration;

use tracing::info;

use super::encode::DisplayPayload;

/// Default request timeout in seconds. The display is on the local network.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors delivering a payload.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("display returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// HTTP endpoint of the display.
#[derive(Debug, Clone)]
pub struct DisplaySink {
    http: reqwest::Client,
    url: String,
}

impl DisplaySink {
    /// Create a sink for `host`. A bare hostname is reached over plain HTTP.
    pub fn new(host: &str) -> Result<Self, SinkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            url: display_url(host),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `payload` as JSON.
    pub async fn send(&self, payload: &DisplayPayload) -> Result<(), SinkError> {
        info!(url = %self.url, "sending payload to display");

        let response = self.http.post(&self.url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), body = %body, "display accepted payload");
        Ok(())
    }
}

fn display_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_http_scheme() {
        assert_eq!(display_url("esp32.local"), "http://esp32.local");
        assert_eq!(display_url("192.168.1.40"), "http://192.168.1.40");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(display_url("http://esp32.local/led"), "http://esp32.local/led");
        assert_eq!(display_url("https://display.example"), "https://display.example");
    }
}
