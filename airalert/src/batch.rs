use crate::alert::evaluate;
use crate::aqi::pm25_to_aqi;
use crate::errors::Result;
use crate::metrics::{ALERTS_SENT_TOTAL, NOTIFY_FAILURES_TOTAL};
use crate::model::{Reading, SensorConfig};
use crate::purpleair::SensorSource;
use crate::store::{self, ReadingStore};
use crate::twilio::Notifier;
use std::path::Path;
use tracing::{info, warn};

/// Loads the store, checks every sensor, and writes the store back.
///
/// A failed fetch aborts the run before anything is written, so readings
/// from sensors checked earlier in the same run are not saved either.
pub async fn run_once<S, N>(
    db_file: &Path,
    sensors: &[SensorConfig],
    source: &S,
    notifier: &N,
) -> Result<()>
where
    S: SensorSource,
    N: Notifier,
{
    let mut readings = store::load(db_file)?;
    info!(
        "Checking {} sensors against {} stored readings",
        sensors.len(),
        readings.len()
    );

    for sensor in sensors {
        check_sensor(sensor, &mut readings, source, notifier).await?;
    }

    store::save(db_file, &readings)?;
    info!("Run complete");
    Ok(())
}

/// Fetches one sensor, sends whatever alerts fire, and records the reading.
pub async fn check_sensor<S, N>(
    sensor: &SensorConfig,
    readings: &mut ReadingStore,
    source: &S,
    notifier: &N,
) -> Result<()>
where
    S: SensorSource,
    N: Notifier,
{
    let sample = source.fetch(&sensor.sensor_id).await?;
    let current = Reading {
        temperature_f: sample.temperature_f,
        aqi: pm25_to_aqi(sample.pm25),
    };
    let previous = readings.get(&sensor.sensor_id);
    let last = previous.unwrap_or_default();

    info!(
        "Last measurement for {}: (t: {}, aqi: {}). Now: (t: {}, aqi: {})",
        sensor.sensor_id, last.temperature_f, last.aqi, current.temperature_f, current.aqi
    );

    let evaluation = evaluate(previous, current);
    for alert in &evaluation.alerts {
        match notifier.send(&sensor.phone, &alert.to_string()).await {
            Ok(()) => ALERTS_SENT_TOTAL.inc(),
            Err(e) => {
                NOTIFY_FAILURES_TOTAL.inc();
                warn!(
                    "Failed to send alert for sensor {}: {}",
                    sensor.sensor_id, e
                );
            }
        }
    }

    readings.set(&sensor.sensor_id, evaluation.reading);
    Ok(())
}
