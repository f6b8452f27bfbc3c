use log::{debug, info, warn};

/// Thin wrapper that tags lifecycle messages with the emitting component.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self::for_component("showroom")
    }

    pub fn for_component(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.component, "{}", message);
    }

    pub fn detail(&self, message: &str) {
        debug!(target: self.component, "{}", message);
    }

    pub fn anomaly(&self, message: &str) {
        warn!(target: self.component, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
