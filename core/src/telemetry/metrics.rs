use std::sync::Mutex;

use serde::{Deserialize, Serialize};

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub listing_queries: usize,
    pub lookup_misses: usize,
    pub unpriced_exclusions: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_query(&self, unpriced_excluded: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.listing_queries += 1;
            metrics.unpriced_exclusions += unpriced_excluded;
        }
    }

    pub fn record_lookup_miss(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.lookup_misses += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
