use std::fmt;

use derive_new::new;
use log::Level;

/// The log target used for every record emitted by the benchmarks
pub static TARGET: &str = "burn_benchmarks";

/// Structured logging context owned by a benchmark and threaded through each hook.
///
/// Every record carries the `dataset` and `task` keys so that runs over several
/// datasets can be told apart without a per-module logger.
#[derive(Debug, Clone, new)]
pub struct Context {
    /// The dataset being benchmarked
    pub dataset: String,

    /// The task the dataset belongs to
    pub task: &'static str,
}

impl Context {
    /// Emit a record at the given level
    pub fn log(&self, level: Level, message: fmt::Arguments<'_>) {
        log::log!(
            target: TARGET,
            level,
            dataset = self.dataset.as_str(),
            task = self.task;
            "{}",
            message
        );
    }

    /// Emit a debug record
    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.log(Level::Debug, message);
    }

    /// Emit an info record
    pub fn info(&self, message: fmt::Arguments<'_>) {
        self.log(Level::Info, message);
    }
}
