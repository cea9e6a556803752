use tracing::{debug, info, warn};

pub(crate) const TARGET: &str = "cgesp_scraper";

#[derive(Clone, Default)]
pub(crate) struct Logger {
    station: Option<String>,
    field: Option<&'static str>,
    url: Option<String>,
    value: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    latency_ms: Option<f64>,
    count: Option<usize>,
}

impl Logger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    pub(crate) fn field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub(crate) fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub(crate) fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub(crate) fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub(crate) fn latency_ms(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    pub(crate) fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub(crate) fn debug(&self, event: &'static str, message: &str) {
        debug!(
            target: TARGET,
            event,
            station = self.station.as_deref(),
            url = self.url.as_deref(),
            latency_ms = self.latency_ms,
            count = self.count,
            "{}",
            message
        );
    }

    pub(crate) fn info(&self, event: &'static str, message: &str) {
        info!(
            target: TARGET,
            event,
            station = self.station.as_deref(),
            url = self.url.as_deref(),
            count = self.count,
            "{}",
            message
        );
    }

    pub(crate) fn warn(&self, event: &'static str, message: &str) {
        warn!(
            target: TARGET,
            event,
            station = self.station.as_deref(),
            field = self.field,
            value = self.value,
            min = self.min,
            max = self.max,
            "{}",
            message
        );
    }
}
