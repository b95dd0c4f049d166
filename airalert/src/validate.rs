use crate::config::Config;
use crate::errors::{Error, Result};
use crate::model::SensorConfig;

/// Validates a single configured sensor
pub fn validate_sensor(index: usize, sensor: &SensorConfig) -> Result<()> {
    if sensor.sensor_id.is_empty() {
        return Err(Error::Config(format!(
            "SENSOR_{} must be set when PHONE_{} is",
            index, index
        )));
    }

    Ok(())
}

/// Validates everything a batch run needs before touching the network
pub fn validate_batch(config: &Config) -> Result<()> {
    for (i, sensor) in config.sensors.iter().enumerate() {
        validate_sensor(i, sensor)?;
    }

    if config.db_file.as_os_str().is_empty() {
        return Err(Error::Config("--db_file is required".to_string()));
    }

    // Credentials only matter if there is someone to text.
    if !config.sensors.is_empty() {
        let twilio = &config.twilio;
        if twilio.account_sid.is_empty()
            || twilio.secret.is_empty()
            || twilio.source_number.is_empty()
        {
            return Err(Error::Config(
                "--twilio_sid, --twilio_secret and --twilio_source_num are required".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates what the web page needs
pub fn validate_web(config: &Config) -> Result<()> {
    for (i, sensor) in config.sensors.iter().enumerate() {
        validate_sensor(i, sensor)?;
    }

    Ok(())
}
