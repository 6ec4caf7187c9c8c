use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HyperviewError {
    #[error("token request to '{url}' failed")]
    TokenRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("token request to '{url}' was rejected with status {status}")]
    TokenStatus {
        url: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("token response from '{url}' carried no access token")]
    TokenDecode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("sensor catalog request for rack '{rack_id}' failed with status {status}")]
    CatalogStatus {
        rack_id: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("daily summary request for sensor '{sensor_id}' failed with status {status}")]
    SummaryStatus {
        sensor_id: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unparseable timestamp '{value}' in summary data")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
