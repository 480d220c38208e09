//! Metric logger traits and composites.

/// Trait for logging episode metrics to various backends.
pub trait MetricLogger: Send + Sync {
    /// Log a scalar value (e.g. total reward).
    fn log_scalar(&self, name: &str, value: f64, step: u64);

    /// Log a batch of related metrics.
    fn log_metrics(&self, metrics: &[(&str, f64)], step: u64) {
        for (name, value) in metrics {
            self.log_scalar(name, *value, step);
        }
    }

    /// Close the logger and flush any pending writes.
    fn close(&self) {}
}

/// A logger that does nothing (default).
pub struct NoOpLogger;

impl MetricLogger for NoOpLogger {
    fn log_scalar(&self, _name: &str, _value: f64, _step: u64) {}
    fn log_metrics(&self, _metrics: &[(&str, f64)], _step: u64) {}
}

/// A composite logger that dispatches to multiple backends.
pub struct CompositeLogger {
    loggers: Vec<Box<dyn MetricLogger>>,
}

impl CompositeLogger {
    pub fn new(loggers: Vec<Box<dyn MetricLogger>>) -> Self {
        Self { loggers }
    }

    pub fn add(&mut self, logger: Box<dyn MetricLogger>) {
        self.loggers.push(logger);
    }
}

impl MetricLogger for CompositeLogger {
    fn log_scalar(&self, name: &str, value: f64, step: u64) {
        for logger in &self.loggers {
            logger.log_scalar(name, value, step);
        }
    }

    fn log_metrics(&self, metrics: &[(&str, f64)], step: u64) {
        for logger in &self.loggers {
            logger.log_metrics(metrics, step);
        }
    }

    fn close(&self) {
        for logger in &self.loggers {
            logger.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingLogger(Arc<AtomicUsize>);

    impl MetricLogger for CountingLogger {
        fn log_scalar(&self, _name: &str, _value: f64, _step: u64) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_composite_dispatches_to_all() {
        let count = Arc::new(AtomicUsize::new(0));
        let composite = CompositeLogger::new(vec![
            Box::new(CountingLogger(count.clone())),
            Box::new(CountingLogger(count.clone())),
        ]);
        composite.log_scalar("reward", 4.0, 200);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_default_log_metrics_fans_out() {
        let count = Arc::new(AtomicUsize::new(0));
        let logger = CountingLogger(count.clone());
        logger.log_metrics(&[("a", 1.0), ("b", 2.0)], 1);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
