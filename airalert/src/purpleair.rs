use crate::errors::Result;
use crate::metrics::{FETCHES_TOTAL, FETCH_FAILURES_TOTAL, PARSE_FAILURES_TOTAL};
use crate::model::{AqiResponse, RawSample, Stats};
use std::future::Future;
use tracing::{debug, warn};

pub const DEFAULT_URL: &str = "https://www.purpleair.com/json";

/// Something that can report averaged raw values for a sensor.
pub trait SensorSource: Send + Sync {
    fn fetch(&self, sensor_id: &str) -> impl Future<Output = Result<RawSample>> + Send;
}

#[derive(Debug, Clone)]
pub struct PurpleAirClient {
    http: reqwest::Client,
    base_url: String,
}

impl PurpleAirClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_response(&self, sensor_id: &str) -> Result<AqiResponse> {
        let body = self
            .http
            .get(&self.base_url)
            .query(&[("show", sensor_id)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

impl SensorSource for PurpleAirClient {
    async fn fetch(&self, sensor_id: &str) -> Result<RawSample> {
        FETCHES_TOTAL.inc();
        debug!("Fetching sensor {}", sensor_id);

        match self.fetch_response(sensor_id).await {
            Ok(response) => Ok(average(&response)),
            Err(e) => {
                FETCH_FAILURES_TOTAL.inc();
                Err(e)
            }
        }
    }
}

/// Averages temperature and 10 minute PM2.5 across a station's child sensors.
///
/// Child sensors with unparsable values are left out of that value's average.
/// Temperature is averaged with integer division.
pub fn average(response: &AqiResponse) -> RawSample {
    let mut temp_sum: i64 = 0;
    let mut temp_count: i64 = 0;
    let mut pm_sum = 0.0;
    let mut pm_count = 0;

    for child in &response.results {
        if let Some(raw) = child.temp_f.as_deref().filter(|s| !s.is_empty()) {
            match raw.parse::<i64>() {
                Ok(t) => {
                    temp_sum += t;
                    temp_count += 1;
                }
                Err(e) => {
                    PARSE_FAILURES_TOTAL.inc();
                    warn!("Could not parse temperature {:?}: {}", raw, e);
                }
            }
        }

        if let Some(raw) = child.stats.as_deref().filter(|s| !s.is_empty()) {
            match serde_json::from_str::<Stats>(raw) {
                Ok(stats) => {
                    pm_sum += stats.avg_10m;
                    pm_count += 1;
                }
                Err(e) => {
                    PARSE_FAILURES_TOTAL.inc();
                    warn!("Could not parse PM2.5 stats {:?}: {}", raw, e);
                }
            }
        }
    }

    RawSample {
        temperature_f: if temp_count > 0 {
            (temp_sum / temp_count) as i32
        } else {
            0
        },
        pm25: if pm_count > 0 {
            pm_sum / pm_count as f64
        } else {
            0.0
        },
    }
}
