/// Benchmark Error
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The benchmark cannot be run with the given data or configuration
    #[error("invalid benchmark: {0}")]
    InvalidBenchmark(String),

    /// The tokenizer failed to encode or configure
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// Predictions or labels could not be scored
    #[error("metric computation failed: {0}")]
    Metric(String),

    /// No metric registered under the requested name
    #[error("no metric found for {name}, available metrics are {available:?}")]
    UnknownMetric {
        /// The requested metric name
        name: String,

        /// The names registered at the time of the lookup
        available: Vec<String>,
    },
}

impl From<tokenizers::Error> for Error {
    fn from(value: tokenizers::Error) -> Self {
        Error::Tokenization(value.to_string())
    }
}

/// Benchmark Result
pub type Result<T> = std::result::Result<T, Error>;
