use crate::aqi::pm25_to_aqi;
use crate::color::{color_for, text_color_for};
use crate::errors::Result;
use crate::metrics::{self, PAGES_RENDERED_TOTAL};
use crate::model::{RawSample, SensorConfig};
use crate::purpleair::SensorSource;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::error;

struct AppState<S> {
    source: Arc<S>,
    sensors: Arc<Vec<SensorConfig>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            sensors: Arc::clone(&self.sensors),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct SensorPage<'a> {
    name: &'a str,
    temperature_f: i32,
    aqi: i32,
    aqi_color: String,
    aqi_text_color: &'static str,
    sensors: &'a [SensorConfig],
}

pub fn create_router<S>(source: S, sensors: Vec<SensorConfig>) -> Router
where
    S: SensorSource + 'static,
{
    let state = AppState {
        source: Arc::new(source),
        sensors: Arc::new(sensors),
    };

    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/:sensor", get(sensor_page::<S>))
        .with_state(state)
}

/// Name shown for a sensor: the last matching configuration's name, or the
/// sensor ID when that is empty or the sensor is not configured.
pub fn display_name<'a>(sensor_id: &'a str, sensors: &'a [SensorConfig]) -> &'a str {
    sensors
        .iter()
        .rev()
        .find(|s| s.sensor_id == sensor_id)
        .map(|s| s.display_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(sensor_id)
}

pub fn render_page(sensor_id: &str, sample: RawSample, sensors: &[SensorConfig]) -> Result<String> {
    let aqi = pm25_to_aqi(sample.pm25);
    let page = SensorPage {
        name: display_name(sensor_id, sensors),
        temperature_f: sample.temperature_f,
        aqi,
        aqi_color: color_for(aqi).to_string(),
        aqi_text_color: text_color_for(aqi).as_str(),
        sensors,
    };

    Ok(page.render()?)
}

async fn sensor_page<S>(
    State(state): State<AppState<S>>,
    Path(sensor_id): Path<String>,
) -> std::result::Result<Html<String>, AppError>
where
    S: SensorSource + 'static,
{
    let sample = state.source.fetch(&sensor_id).await?;
    let page = render_page(&sensor_id, sample, &state.sensors)?;
    PAGES_RENDERED_TOTAL.inc();
    Ok(Html(page))
}

async fn metrics_handler() -> String {
    metrics::gather_metrics()
}

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
