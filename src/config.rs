//! Run configuration: one explicit value passed into the pipeline.
//!
//! Everything the job needs (endpoint, credentials, rack list, recipient)
//! lives here, loaded from a TOML file by the binary or built
//! programmatically. Nothing is global and nothing mutates after load.

use crate::hyperview::catalog::{HUMIDITY_SENSOR_TYPE_ID, TEMPERATURE_SENSOR_TYPE_ID};
use bon::Builder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var that overrides `api.client_id` from the config file.
pub const CLIENT_ID_ENV: &str = "RACKREPORT_CLIENT_ID";
/// Env var that overrides `api.client_secret` from the config file.
pub const CLIENT_SECRET_ENV: &str = "RACKREPORT_CLIENT_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// What to do when a recoverable per-rack condition occurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the whole run (the original all-or-nothing behavior).
    #[default]
    Abort,
    /// Log the condition and continue with the remaining work.
    Skip,
}

/// Monitoring-API endpoint and credentials.
#[derive(Debug, Clone, Deserialize, Builder)]
pub struct ApiConfig {
    /// Base URL of the monitoring service, e.g. `https://dcim.example.com`.
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Sensor-type id identifying humidity sensors. Defaults to the
    /// well-known Hyperview constant.
    #[serde(default = "default_humidity_type_id")]
    #[builder(default = default_humidity_type_id())]
    pub humidity_type_id: String,
    /// Sensor-type id identifying temperature sensors. Defaults to the
    /// well-known Hyperview constant.
    #[serde(default = "default_temperature_type_id")]
    #[builder(default = default_temperature_type_id())]
    pub temperature_type_id: String,
}

fn default_humidity_type_id() -> String {
    HUMIDITY_SENSOR_TYPE_ID.to_string()
}

fn default_temperature_type_id() -> String {
    TEMPERATURE_SENSOR_TYPE_ID.to_string()
}

/// Report shaping and failure-policy options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Where the workbook is written.
    pub output_path: PathBuf,
    /// Policy for a failed catalog or summary fetch of one rack.
    pub on_rack_error: FailurePolicy,
    /// Policy for a rack whose catalog lacks a humidity or temperature
    /// sensor.
    pub on_missing_sensor: FailurePolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("Rack_Sensor_Data.xlsx"),
            on_rack_error: FailurePolicy::Abort,
            on_missing_sensor: FailurePolicy::Abort,
        }
    }
}

/// SMTP delivery settings for the report email.
#[derive(Debug, Clone, Deserialize, Builder)]
pub struct EmailConfig {
    /// Host of the local mail relay the report is handed to.
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    #[builder(default = default_smtp_port())]
    pub smtp_port: u16,
    pub from: String,
    pub recipient: String,
}

fn default_smtp_port() -> u16 {
    25
}

/// The full run configuration.
#[derive(Debug, Clone, Deserialize, Builder)]
pub struct ReportConfig {
    pub api: ApiConfig,
    /// Ordered list of rack asset ids; fetch order and therefore output
    /// order follow this list.
    pub racks: Vec<String>,
    #[serde(default)]
    #[builder(default)]
    pub report: ReportOptions,
    /// Absent table means export-only: no email is sent.
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

/// Loads a [`ReportConfig`] from a TOML file.
///
/// `RACKREPORT_CLIENT_ID` / `RACKREPORT_CLIENT_SECRET` environment
/// variables, when set, override the credentials from the file so secrets
/// can stay out of it.
pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let mut config: ReportConfig =
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    if let Ok(client_id) = std::env::var(CLIENT_ID_ENV) {
        config.api.client_id = client_id;
    }
    if let Ok(client_secret) = std::env::var(CLIENT_SECRET_ENV) {
        config.api.client_secret = client_secret;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        racks = ["rack-1", "rack-2"]

        [api]
        base_url = "https://dcim.example.com"
        client_id = "id"
        client_secret = "secret"
    "#;

    #[test]
    fn minimal_config_applies_defaults() {
        let config: ReportConfig = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.racks, ["rack-1", "rack-2"]);
        assert_eq!(config.api.humidity_type_id, HUMIDITY_SENSOR_TYPE_ID);
        assert_eq!(config.api.temperature_type_id, TEMPERATURE_SENSOR_TYPE_ID);
        assert_eq!(
            config.report.output_path,
            PathBuf::from("Rack_Sensor_Data.xlsx")
        );
        assert_eq!(config.report.on_rack_error, FailurePolicy::Abort);
        assert_eq!(config.report.on_missing_sensor, FailurePolicy::Abort);
        assert!(config.email.is_none());
    }

    #[test]
    fn policies_and_email_parse() {
        let raw = format!(
            "{MINIMAL}
            [report]
            output_path = \"out.xlsx\"
            on_rack_error = \"skip\"
            on_missing_sensor = \"skip\"

            [email]
            smtp_host = \"relay.example.com\"
            from = \"reports@example.com\"
            recipient = \"facilities@example.com\"
        "
        );
        let config: ReportConfig = toml::from_str(&raw).unwrap();
        assert_eq!(config.report.on_rack_error, FailurePolicy::Skip);
        assert_eq!(config.report.on_missing_sensor, FailurePolicy::Skip);
        let email = config.email.unwrap();
        assert_eq!(email.smtp_port, 25);
        assert_eq!(email.recipient, "facilities@example.com");
    }

    #[test]
    fn unknown_policy_value_is_rejected() {
        let raw = format!(
            "{MINIMAL}
            [report]
            on_rack_error = \"retry\"
        "
        );
        assert!(toml::from_str::<ReportConfig>(&raw).is_err());
    }

    #[test]
    fn shipped_example_config_parses() {
        let raw = include_str!("../rackreport.example.toml");
        let config: ReportConfig = toml::from_str(raw).unwrap();
        assert!(config.racks.len() >= 38);
        assert!(config.email.is_some());
    }

    #[test]
    fn builder_covers_programmatic_construction() {
        let config = ReportConfig::builder()
            .api(
                ApiConfig::builder()
                    .base_url("https://dcim.example.com".to_string())
                    .client_id("id".to_string())
                    .client_secret("secret".to_string())
                    .build(),
            )
            .racks(vec!["rack-1".to_string()])
            .build();
        assert_eq!(config.api.humidity_type_id, HUMIDITY_SENSOR_TYPE_ID);
        assert_eq!(config.report.on_rack_error, FailurePolicy::Abort);
        assert!(config.email.is_none());
    }
}
