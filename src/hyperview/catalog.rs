//! Sensor catalog wire types and the humidity/temperature pair extraction.
//!
//! The catalog endpoint returns every sensor attached to a rack asset. Only
//! two of them matter here: the rack's one humidity sensor and one
//! temperature sensor, identified by their well-known sensor-type ids. The
//! rack's PDU display name rides along on each sensor record.

use serde::Deserialize;

/// Hyperview's fixed sensor-type id for relative humidity sensors.
pub const HUMIDITY_SENSOR_TYPE_ID: &str = "466799ea-0e25-e211-8183-001c42e521d8";

/// Hyperview's fixed sensor-type id for temperature sensors.
pub const TEMPERATURE_SENSOR_TYPE_ID: &str = "52835710-56f9-4311-babb-67b21b423c7d";

/// One sensor record as returned by the catalog endpoint.
///
/// Mirrors the JSON payload; fields this job does not consume are ignored
/// during deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDescriptor {
    /// Classifies the sensor (humidity, temperature, airflow, ...).
    pub sensor_type_id: String,
    /// The sensor's own asset id, used to query daily summaries.
    pub id: String,
    /// Display name of the PDU the sensor is mounted on.
    pub source_asset_display_name: String,
}

/// The pair of sensor-type ids the extraction scans for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorTypeIds {
    pub humidity: String,
    pub temperature: String,
}

impl Default for SensorTypeIds {
    fn default() -> Self {
        Self {
            humidity: HUMIDITY_SENSOR_TYPE_ID.to_string(),
            temperature: TEMPERATURE_SENSOR_TYPE_ID.to_string(),
        }
    }
}

/// A rack's extracted sensor ids and PDU display name.
///
/// Every field is optional: a rack whose catalog lacks one (or both) sensor
/// types yields a partial pair, and the caller decides whether that is fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorPair {
    /// Display name of the first matching sensor's PDU.
    pub pdu_name: Option<String>,
    pub humidity_id: Option<String>,
    pub temperature_id: Option<String>,
}

impl SensorPair {
    /// True once both sensor ids have been captured.
    pub fn is_complete(&self) -> bool {
        self.humidity_id.is_some() && self.temperature_id.is_some()
    }
}

/// Scans a rack's sensor list for its humidity and temperature sensor ids.
///
/// Single linear pass. The first sensor of each type wins; the PDU name is
/// taken from whichever matching sensor is encountered first. The scan stops
/// early once both ids are set. A list with no matching sensors returns an
/// all-`None` pair rather than an error.
pub fn extract_sensor_pair(sensors: &[SensorDescriptor], types: &SensorTypeIds) -> SensorPair {
    let mut pair = SensorPair::default();
    for sensor in sensors {
        if sensor.sensor_type_id == types.humidity && pair.humidity_id.is_none() {
            pair.humidity_id = Some(sensor.id.clone());
            if pair.pdu_name.is_none() {
                pair.pdu_name = Some(sensor.source_asset_display_name.clone());
            }
        } else if sensor.sensor_type_id == types.temperature && pair.temperature_id.is_none() {
            pair.temperature_id = Some(sensor.id.clone());
            if pair.pdu_name.is_none() {
                pair.pdu_name = Some(sensor.source_asset_display_name.clone());
            }
        }
        if pair.is_complete() {
            break;
        }
    }
    pair
}
