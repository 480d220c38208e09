//! Console logging backend.

use super::MetricLogger;

/// Logger that prints metrics to stdout via tracing.
pub struct ConsoleLogger;

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl MetricLogger for ConsoleLogger {
    fn log_scalar(&self, name: &str, value: f64, step: u64) {
        tracing::info!("Step {}: {} = {:.4}", step, name, value);
    }

    fn log_metrics(&self, metrics: &[(&str, f64)], step: u64) {
        // one line per batch to avoid spamming
        let mut output = format!("Step {}: ", step);
        for (i, (name, value)) in metrics.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            output.push_str(&format!("{}={:.4}", name, value));
        }
        tracing::info!("{}", output);
    }
}
