use thiserror::Error;

/// Failures raised by a catalog client before they reach a state slot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Connection, TLS, timeout or body read failure
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// Server answered with a non-success status
    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },
    /// Body was not the JSON shape we expect
    #[error("could not decode {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },
    /// No credential configured; every RAWG call would be rejected
    #[error("no API key configured (set `api_key` in config.json or GAMEDECK_API_KEY)")]
    MissingApiKey,
}

impl CatalogError {
    #[must_use]
    pub fn status(endpoint: &str, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.to_string(),
            status,
        }
    }

    #[must_use]
    pub fn decode(endpoint: &str, reason: impl ToString) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
