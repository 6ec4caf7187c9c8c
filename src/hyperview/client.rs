//! The authenticated monitoring-API client.
//!
//! A [`HyperviewClient`] is bound to the bearer token it acquired at
//! construction; the token is never refreshed and no header map is shared or
//! mutated. All fetches are issued one at a time by the caller.

use crate::config::ApiConfig;
use crate::hyperview::auth;
use crate::hyperview::catalog::SensorDescriptor;
use crate::hyperview::error::HyperviewError;
use crate::hyperview::summary::{self, DailySummaryPoint, SummaryContainer};
use log::{info, warn};

const CATALOG_PATH: &str = "/api/asset/sensors";
const SUMMARY_PATH: &str = "/api/asset/sensorsDailySummaries/numeric/last7Days";

/// An HTTP client for the monitoring API, bound to one bearer token.
pub struct HyperviewClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl HyperviewClient {
    /// Performs the token exchange and returns a client bound to the result.
    ///
    /// # Errors
    ///
    /// Returns [`HyperviewError::TokenRequest`], [`HyperviewError::TokenStatus`]
    /// or [`HyperviewError::TokenDecode`] when the exchange fails; nothing can
    /// be fetched without a token.
    pub async fn connect(config: &ApiConfig) -> Result<Self, HyperviewError> {
        let http = reqwest::Client::new();
        let bearer_token = auth::acquire_token(&http, config).await?;
        info!("acquired bearer token from {}", config.base_url);
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token,
        })
    }

    /// Fetches the full sensor catalog for one rack asset.
    ///
    /// # Errors
    ///
    /// A non-success HTTP status maps to [`HyperviewError::CatalogStatus`]
    /// carrying the rack id; transport failures map to
    /// [`HyperviewError::Network`].
    pub async fn fetch_sensors(
        &self,
        rack_id: &str,
    ) -> Result<Vec<SensorDescriptor>, HyperviewError> {
        let url = format!("{}{}/{}", self.base_url, CATALOG_PATH, rack_id);
        info!("fetching sensor catalog for rack {rack_id}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| HyperviewError::Network {
                url: url.clone(),
                source: e,
            })?;

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("catalog request for rack {rack_id} failed: {e}");
                return Err(match e.status() {
                    Some(status) => HyperviewError::CatalogStatus {
                        rack_id: rack_id.to_string(),
                        status,
                        source: e,
                    },
                    None => HyperviewError::Network { url, source: e },
                });
            }
        };

        response
            .json()
            .await
            .map_err(|e| HyperviewError::Decode { url, source: e })
    }

    /// Fetches the last-7-days daily numeric summary for one sensor id and
    /// flattens it into a sequence of [`DailySummaryPoint`]s.
    ///
    /// # Errors
    ///
    /// A non-success HTTP status maps to [`HyperviewError::SummaryStatus`]
    /// carrying the sensor id; an unparseable point timestamp maps to
    /// [`HyperviewError::Timestamp`].
    pub async fn fetch_summary(
        &self,
        sensor_id: &str,
    ) -> Result<Vec<DailySummaryPoint>, HyperviewError> {
        let url = format!("{}{}", self.base_url, SUMMARY_PATH);
        info!("fetching daily summary for sensor {sensor_id}");

        let response = self
            .http
            .get(&url)
            .query(&[("sensorIds", sensor_id)])
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| HyperviewError::Network {
                url: url.clone(),
                source: e,
            })?;

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!("summary request for sensor {sensor_id} failed: {e}");
                return Err(match e.status() {
                    Some(status) => HyperviewError::SummaryStatus {
                        sensor_id: sensor_id.to_string(),
                        status,
                        source: e,
                    },
                    None => HyperviewError::Network { url, source: e },
                });
            }
        };

        let containers: Vec<SummaryContainer> = response
            .json()
            .await
            .map_err(|e| HyperviewError::Decode { url, source: e })?;
        summary::into_points(containers)
    }
}
