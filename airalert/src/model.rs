use serde::Deserialize;
use std::fmt;

/// One monitored sensor and where its alerts go.
#[derive(Clone, PartialEq, Eq)]
pub struct SensorConfig {
    pub phone: String,
    pub sensor_id: String,
    pub display_name: String,
}

impl SensorConfig {
    /// Human label, falling back to the sensor ID when no name is configured.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.sensor_id
        } else {
            &self.display_name
        }
    }
}

// Phone numbers stay out of logs.
impl fmt::Debug for SensorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorConfig")
            .field("phone", &"<redacted>")
            .field("sensor_id", &self.sensor_id)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Averaged temperature and converted AQI for one sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reading {
    pub temperature_f: i32,
    pub aqi: i32,
}

/// Raw averages returned by a sensor source, before AQI conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSample {
    pub temperature_f: i32,
    pub pm25: f64,
}

/// PurpleAir `/json?show=<id>` response body
#[derive(Debug, Default, Deserialize)]
pub struct AqiResponse {
    #[serde(default)]
    pub results: Vec<ChildSensor>,
}

/// One child sensor of a station. Numeric fields arrive as strings.
#[derive(Debug, Default, Deserialize)]
pub struct ChildSensor {
    #[serde(default)]
    pub temp_f: Option<String>,
    #[serde(rename = "Stats", alias = "stats", default)]
    pub stats: Option<String>,
}

/// JSON document embedded in `ChildSensor::stats`.
#[derive(Debug, Default, Deserialize)]
pub struct Stats {
    #[serde(rename = "v", default)]
    pub current: f64,
    #[serde(rename = "v1", default)]
    pub avg_10m: f64,
}
