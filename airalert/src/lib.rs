//! Air quality alerts for PurpleAir sensors.
//!
//! A batch run fetches every configured sensor, converts PM2.5 to AQI,
//! compares it with the last stored reading and texts the sensor's owner
//! when the air or temperature changes in a way worth knowing about. In web
//! mode the same conversion backs a page showing live AQI for one sensor.

pub mod alert;
pub mod aqi;
pub mod batch;
pub mod color;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod purpleair;
pub mod store;
pub mod twilio;
pub mod validate;
pub mod web;
