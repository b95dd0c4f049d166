use crate::model::Reading;
use std::fmt;

const WARM_F: i32 = 80;
const UNHEALTHY_AQI: i32 = 100;
const SPIKE_DELTA: i32 = 40;

/// A notification triggered by the change between two readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    /// Temperature fell back under 80°F while the air is clean.
    CoolingOff { temperature_f: i32, aqi: i32 },
    /// Air cleared up on a day that was not hot.
    NiceOut { temperature_f: i32, aqi: i32 },
    /// AQI jumped by more than 40 since the last reading.
    Spike { aqi: i32 },
}

/// The message body sent to the subscriber.
impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::CoolingOff { temperature_f, aqi } => {
                write!(f, "It's cooling off! Temp: {} AQI: {}", temperature_f, aqi)
            }
            Alert::NiceOut { temperature_f, aqi } => write!(
                f,
                "It's nice out! Maybe you can open a window. Temp: {} AQI: {}",
                temperature_f, aqi
            ),
            Alert::Spike { aqi } => write!(f, "Greetings earthling! The AQI is now: {}", aqi),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub alerts: Vec<Alert>,
    /// Reading to persist for the sensor. Always the current one.
    pub reading: Reading,
}

impl Evaluation {
    pub fn messages(&self) -> Vec<String> {
        self.alerts.iter().map(ToString::to_string).collect()
    }
}

/// Compares the current reading with the last persisted one.
///
/// A sensor without history is compared against an all-zero reading, so a
/// first reading above AQI 40 raises a spike alert. Conditions are checked
/// against the same pair and may fire together; they are returned in a fixed
/// order (cooling off, nice out, spike).
pub fn evaluate(previous: Option<Reading>, current: Reading) -> Evaluation {
    let last = previous.unwrap_or_default();
    let mut alerts = Vec::new();

    if last.temperature_f > WARM_F && current.temperature_f < WARM_F && current.aqi < UNHEALTHY_AQI
    {
        alerts.push(Alert::CoolingOff {
            temperature_f: current.temperature_f,
            aqi: current.aqi,
        });
    }

    if last.aqi > UNHEALTHY_AQI && current.aqi < UNHEALTHY_AQI && last.temperature_f < WARM_F {
        alerts.push(Alert::NiceOut {
            temperature_f: current.temperature_f,
            aqi: current.aqi,
        });
    }

    if i64::from(current.aqi) > i64::from(last.aqi) + i64::from(SPIKE_DELTA) {
        alerts.push(Alert::Spike { aqi: current.aqi });
    }

    Evaluation {
        alerts,
        reading: current,
    }
}
