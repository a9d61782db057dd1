use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Matthews correlation coefficient
pub mod mcc;

pub use mcc::MatthewsCorrelation;

/// Metric names mapped to their values
pub type Scores = BTreeMap<String, f64>;

/// A metric computed from predicted and reference class ids
pub trait Metric: Send + Sync {
    /// The name this metric reports its value under
    fn name(&self) -> &str;

    /// Score the predictions against the references
    fn compute(&self, predictions: &[usize], references: &[usize]) -> Result<Scores>;
}

/// Registry of metrics available to a benchmark, keyed by a short name (e.g., "mcc")
pub struct Metrics(BTreeMap<String, Box<dyn Metric>>);

impl Metrics {
    /// An empty registry
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Register a metric under the given key, replacing any previous entry
    pub fn with_metric(mut self, key: &str, metric: impl Metric + 'static) -> Self {
        self.0.insert(key.to_string(), Box::new(metric));
        self
    }

    /// Look up a metric by key
    pub fn metric(&self, key: &str) -> Result<&dyn Metric> {
        self.0
            .get(key)
            .map(|metric| metric.as_ref())
            .ok_or_else(|| Error::UnknownMetric {
                name: key.to_string(),
                available: self.0.keys().cloned().collect(),
            })
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::empty().with_metric(mcc::KEY, MatthewsCorrelation)
    }
}
