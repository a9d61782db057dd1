use std::collections::BTreeMap;

use crate::utils::classes::labels_by_id;

/// Model configuration properties the benchmarks depend on
#[derive(burn::config::Config)]
pub struct ModelConfig {
    /// A mapping from class name labels to class ids
    pub label2id: BTreeMap<String, usize>,

    /// Id of the padding token, used when the tokenizer carries no padding settings
    #[config(default = 0)]
    pub pad_token_id: u32,

    /// Maximum sequence length for the tokenizer, if different from the tokenizer's own
    pub max_seq_len: Option<usize>,
}

impl ModelConfig {
    /// Build a configuration whose class ids follow the order of the given labels
    pub fn new_with_labels(labels: &[String]) -> Self {
        let label2id = labels
            .iter()
            .enumerate()
            .map(|(i, s)| (s.trim().to_string(), i))
            .collect();

        ModelConfig::new(label2id)
    }

    /// Class names ordered by class id
    pub fn id2label(&self) -> Vec<String> {
        labels_by_id(&self.label2id)
    }
}

/// Dataset configuration
#[derive(burn::config::Config)]
pub struct DatasetConfig {
    /// Short name used in logs (e.g., "angry-tweets")
    pub name: String,

    /// Human readable name
    pub pretty_name: String,

    /// Class labels, in class id order
    pub labels: Vec<String>,
}

/// Settings shared by every benchmark run
#[derive(burn::config::Config)]
pub struct BenchmarkConfig {
    /// Batch size used by the data collator during evaluation
    #[config(default = 32)]
    pub batch_size: usize,

    /// Number of examples tokenized together during preprocessing
    #[config(default = 1000)]
    pub map_batch_size: usize,
}
