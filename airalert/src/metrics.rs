use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Opts, Registry, TextEncoder};
use std::sync::Once;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref FETCHES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "airalert_fetches_total",
        "Total sensor readings requested from the upstream API"
    ))
    .unwrap();
    pub static ref FETCH_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "airalert_fetch_failures_total",
        "Total sensor fetches that failed"
    ))
    .unwrap();
    pub static ref PARSE_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "airalert_parse_failures_total",
        "Total child sensor values skipped because they could not be parsed"
    ))
    .unwrap();
    pub static ref ALERTS_SENT_TOTAL: Counter = Counter::with_opts(Opts::new(
        "airalert_alerts_sent_total",
        "Total alert messages accepted by the messaging provider"
    ))
    .unwrap();
    pub static ref NOTIFY_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "airalert_notify_failures_total",
        "Total alert messages that could not be sent"
    ))
    .unwrap();
    pub static ref PAGES_RENDERED_TOTAL: Counter = Counter::with_opts(Opts::new(
        "airalert_pages_rendered_total",
        "Total sensor pages served"
    ))
    .unwrap();
}

static INIT: Once = Once::new();

pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY.register(Box::new(FETCHES_TOTAL.clone())).unwrap();
        REGISTRY
            .register(Box::new(FETCH_FAILURES_TOTAL.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(PARSE_FAILURES_TOTAL.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(ALERTS_SENT_TOTAL.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(NOTIFY_FAILURES_TOTAL.clone()))
            .unwrap();
        REGISTRY
            .register(Box::new(PAGES_RENDERED_TOTAL.clone()))
            .unwrap();
    });
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_metrics();
        init_metrics();
        FETCHES_TOTAL.inc();

        assert!(gather_metrics().contains("airalert_fetches_total"));
    }
}
