use crate::error::{Error, Result};
use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Mutation metrics
    pub static ref POINT_CHARGES: IntCounter = IntCounter::new(
        "point_charges_total",
        "Total number of successful charges"
    ).expect("metric definition is valid");

    pub static ref POINT_USES: IntCounter = IntCounter::new(
        "point_uses_total",
        "Total number of successful uses"
    ).expect("metric definition is valid");

    pub static ref POINT_REJECTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "point_rejections_total",
            "Total number of rejected charge/use requests"
        ),
        &["kind", "reason"]
    ).expect("metric definition is valid");

    // Lock metrics
    pub static ref ACCOUNT_LOCKS: IntGauge = IntGauge::new(
        "account_locks",
        "Number of per-account locks created"
    ).expect("metric definition is valid");

    pub static ref LOCK_WAIT_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "account_lock_wait_seconds",
            "Time spent waiting for a per-account lock"
        ).buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0])
    ).expect("metric definition is valid");
}

pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(POINT_CHARGES.clone())).map_err(metrics_error)?;
    REGISTRY.register(Box::new(POINT_USES.clone())).map_err(metrics_error)?;
    REGISTRY.register(Box::new(POINT_REJECTIONS.clone())).map_err(metrics_error)?;
    REGISTRY.register(Box::new(ACCOUNT_LOCKS.clone())).map_err(metrics_error)?;
    REGISTRY.register(Box::new(LOCK_WAIT_LATENCY.clone())).map_err(metrics_error)?;
    Ok(())
}

/// Render the registry in the Prometheus text exposition format.
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(metrics_error)?;
    String::from_utf8(buffer).map_err(|e| Error::MetricsError(e.to_string()))
}

fn metrics_error(e: prometheus::Error) -> Error {
    Error::MetricsError(e.to_string())
}
