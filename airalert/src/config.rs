use crate::model::SensorConfig;
use crate::purpleair;
use crate::twilio::TwilioCredentials;
use clap::Parser;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "airalert", about = "Texts you when the air outside changes")]
pub struct Args {
    /// If non-zero, serve the web page on this port instead of running alerts
    #[arg(long, env = "PORT", default_value_t = 0)]
    pub port: u16,

    /// Address the web page binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    /// File holding the previous readings
    #[arg(long = "db_file", env = "DB_FILE")]
    pub db_file: Option<PathBuf>,

    /// Twilio account SID
    #[arg(long = "twilio_sid", env = "TWILIO_SID", default_value = "")]
    pub twilio_sid: String,

    /// Twilio account secret
    #[arg(
        long = "twilio_secret",
        env = "TWILIO_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    pub twilio_secret: String,

    /// Twilio source phone number
    #[arg(long = "twilio_source_num", env = "TWILIO_SOURCE_NUM", default_value = "")]
    pub twilio_source_num: String,

    /// PurpleAir JSON endpoint
    #[arg(long = "purpleair_url", env = "PURPLEAIR_URL", default_value = purpleair::DEFAULT_URL)]
    pub purpleair_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind: String,
    pub db_file: PathBuf,
    pub twilio: TwilioCredentials,
    pub purpleair_url: String,
    pub sensors: Vec<SensorConfig>,
}

impl Config {
    pub fn new(args: Args, sensors: Vec<SensorConfig>) -> Self {
        Self {
            port: args.port,
            bind: args.bind,
            db_file: args.db_file.unwrap_or_default(),
            twilio: TwilioCredentials {
                account_sid: args.twilio_sid,
                secret: args.twilio_secret,
                source_number: args.twilio_source_num,
            },
            purpleair_url: args.purpleair_url,
            sensors,
        }
    }

    /// Parses the command line and reads the sensor list from the environment.
    pub fn load() -> Self {
        Self::new(Args::parse(), sensors_from_env())
    }

    pub fn web_mode(&self) -> bool {
        self.port != 0
    }
}

pub fn sensors_from_env() -> Vec<SensorConfig> {
    sensors_from_lookup(|key| env::var(key).ok())
}

/// Reads `PHONE_<i>`, `SENSOR_<i>` and `NAME_<i>` for i = 0, 1, ... until
/// `PHONE_<i>` is missing or empty.
pub fn sensors_from_lookup<F>(lookup: F) -> Vec<SensorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut sensors = Vec::new();
    for i in 0.. {
        let phone = lookup(&format!("PHONE_{}", i)).unwrap_or_default();
        if phone.is_empty() {
            break;
        }
        sensors.push(SensorConfig {
            phone,
            sensor_id: lookup(&format!("SENSOR_{}", i)).unwrap_or_default(),
            display_name: lookup(&format!("NAME_{}", i)).unwrap_or_default(),
        });
    }
    sensors
}
