//! Metrics collection for planner-service.
//!
//! HTTP metrics flow through the `metrics` recorder installed here; the
//! generation counters live in a `prometheus` registry. Both are rendered by
//! `GET /metrics`. Recording before `init_metrics` is a no-op.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static ITINERARY_GENERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static ITINERARY_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize metrics collection. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics handle already initialized"))?;

    let registry = Registry::new();

    let generations = IntCounterVec::new(
        Opts::new(
            "itinerary_generations_total",
            "Itinerary generation attempts by model and outcome",
        ),
        &["model", "outcome"],
    )?;

    let tokens = IntCounterVec::new(
        Opts::new("itinerary_tokens_total", "Tokens processed by the model"),
        &["model", "type"], // type: input, output
    )?;

    let latency = HistogramVec::new(
        HistogramOpts::new(
            "model_provider_latency_seconds",
            "Latency of the upstream model call in seconds",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
    )?;

    registry.register(Box::new(generations.clone()))?;
    registry.register(Box::new(tokens.clone()))?;
    registry.register(Box::new(latency.clone()))?;

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = ITINERARY_GENERATIONS_TOTAL.set(generations);
    let _ = ITINERARY_TOKENS_TOTAL.set(tokens);
    let _ = PROVIDER_LATENCY_SECONDS.set(latency);

    Ok(())
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&registry.gather(), &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

pub fn record_generation(model: &str, outcome: &str) {
    if let Some(counter) = ITINERARY_GENERATIONS_TOTAL.get() {
        counter.with_label_values(&[model, outcome]).inc();
    }
}

pub fn record_tokens(model: &str, input: u32, output: u32) {
    if let Some(counter) = ITINERARY_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(u64::from(input));
        counter
            .with_label_values(&[model, "output"])
            .inc_by(u64::from(output));
    }
}

pub fn record_provider_latency(model: &str, seconds: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[model]).observe(seconds);
    }
}
