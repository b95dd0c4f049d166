use crate::errors::Result;
use crate::model::Reading;
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Last known reading per sensor ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingStore {
    readings: HashMap<String, Reading>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sensor_id: &str) -> Option<Reading> {
        self.readings.get(sensor_id).copied()
    }

    pub fn set(&mut self, sensor_id: &str, reading: Reading) {
        self.readings.insert(sensor_id.to_string(), reading);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Parses `<unix_ts>,<sensor_id>,<temperature_f>,<aqi>` lines.
    ///
    /// Lines with fewer than four fields are skipped and unparsable numbers
    /// read as zero. Numbers are read as 64-bit and clamped into `i32`. Later
    /// lines win for a repeated sensor.
    pub fn parse(contents: &str) -> Self {
        let mut store = Self::new();
        for line in contents.trim().lines() {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 4 {
                continue;
            }
            store.set(
                fields[1],
                Reading {
                    temperature_f: parse_field(fields[2]),
                    aqi: parse_field(fields[3]),
                },
            );
        }
        store
    }

    /// One line per sensor, all stamped with `timestamp`.
    pub fn render(&self, timestamp: i64) -> String {
        let mut out = String::new();
        for (sensor_id, reading) in &self.readings {
            out.push_str(&format!(
                "{},{},{},{}\n",
                timestamp, sensor_id, reading.temperature_f, reading.aqi
            ));
        }
        out
    }
}

fn parse_field(raw: &str) -> i32 {
    let value: i64 = raw.parse().unwrap_or(0);
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Reads the store from `path`, creating an empty file when none exists.
pub fn load(path: &Path) -> Result<ReadingStore> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No reading store at {}, creating it", path.display());
            fs::write(path, "")?;
            String::new()
        }
        Err(e) => return Err(e.into()),
    };

    let store = ReadingStore::parse(&contents);
    debug!("Loaded {} readings from {}", store.len(), path.display());
    Ok(store)
}

/// Rewrites the whole file with the current time as every line's timestamp.
pub fn save(path: &Path, store: &ReadingStore) -> Result<()> {
    fs::write(path, store.render(Utc::now().timestamp()))?;
    debug!("Wrote {} readings to {}", store.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let store = ReadingStore::parse("1600000000,1234,72,45\n1600000000,abcd,90,160\n");

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("1234"),
            Some(Reading {
                temperature_f: 72,
                aqi: 45
            })
        );
        assert_eq!(
            store.get("abcd"),
            Some(Reading {
                temperature_f: 90,
                aqi: 160
            })
        );
    }

    #[test]
    fn test_parse_skips_short_lines() {
        let store = ReadingStore::parse("\n1600000000,1234,72\ngarbage\n\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_parse_bad_numbers_read_as_zero() {
        let store = ReadingStore::parse("1600000000,1234,warm,12.5");
        assert_eq!(store.get("1234"), Some(Reading::default()));
    }

    #[test]
    fn test_parse_wide_numbers_are_clamped() {
        let store = ReadingStore::parse("1600000000,1234,-3000000000,3000000000");
        assert_eq!(
            store.get("1234"),
            Some(Reading {
                temperature_f: i32::MIN,
                aqi: i32::MAX
            })
        );
    }

    #[test]
    fn test_parse_last_line_wins() {
        let store = ReadingStore::parse("1,1234,70,10\n2,1234,71,11");
        assert_eq!(
            store.get("1234"),
            Some(Reading {
                temperature_f: 71,
                aqi: 11
            })
        );
    }

    #[test]
    fn test_missing_sensor_is_none() {
        assert_eq!(ReadingStore::new().get("1234"), None);
    }

    #[test]
    fn test_render_then_parse() {
        let mut store = ReadingStore::new();
        store.set(
            "1234",
            Reading {
                temperature_f: 68,
                aqi: 33,
            },
        );
        store.set(
            "5678",
            Reading {
                temperature_f: -4,
                aqi: 210,
            },
        );

        let rendered = store.render(1_700_000_000);
        assert!(rendered.contains("1700000000,1234,68,33\n"));
        assert!(rendered.contains("1700000000,5678,-4,210\n"));
        assert_eq!(ReadingStore::parse(&rendered), store);
    }
}
