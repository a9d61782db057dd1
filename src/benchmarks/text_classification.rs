//! Text classification benchmark, scored with the Matthews correlation coefficient

use std::collections::{BTreeMap, BTreeSet};

use burn::{
    data::dataset::{Dataset, InMemDataset},
    tensor::backend::Backend,
};
use tokenizers::{Tokenizer, TruncationParams};

use crate::{
    datasets::{map_batched, Example, Features},
    error::{Error, Result},
    frameworks::FrameworkInputs,
    logging::Context,
    metrics::{mcc, Metrics, Scores},
    utils::tensors,
};

use super::{
    batcher::{padding_params, Batcher},
    BenchmarkConfig, BenchmarkDataset, DatasetConfig, ModelConfig, PredictionsAndLabels,
};

/// The unique string token that identifies this task
pub static TEXT_CLASSIFICATION: &str = "text-classification";

/// Truncation length used when neither the model config nor the tokenizer provide one
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Text classification benchmark dataset
pub struct TextClassificationBenchmark {
    /// The configuration of the dataset
    pub dataset_config: DatasetConfig,

    /// The configuration of the benchmark
    pub benchmark_config: BenchmarkConfig,

    metrics: Metrics,

    context: Context,
}

impl TextClassificationBenchmark {
    /// Create a benchmark for the given dataset, scored with the default metrics
    pub fn new(dataset_config: DatasetConfig, benchmark_config: BenchmarkConfig) -> Self {
        let context = Context::new(dataset_config.name.clone(), TEXT_CLASSIFICATION);

        Self {
            dataset_config,
            benchmark_config,
            metrics: Metrics::default(),
            context,
        }
    }

    /// Replace the metric registry
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Convert a batch of class name labels to class ids
    pub fn create_numerical_labels(
        &self,
        labels: &[String],
        label2id: &BTreeMap<String, usize>,
    ) -> Result<Vec<usize>> {
        let ids: Option<Vec<usize>> = labels
            .iter()
            .map(|label| label2id.get(label).copied())
            .collect();

        ids.ok_or_else(|| {
            let missing: BTreeSet<&str> = labels
                .iter()
                .filter(|label| !label2id.contains_key(*label))
                .map(String::as_str)
                .collect();

            Error::InvalidBenchmark(format!(
                "One of the labels in the dataset, {:?}, does not occur in the label2id \
                 dictionary {:?}. Missing labels: {:?}.",
                labels, label2id, missing
            ))
        })
    }

    /// Clone the tokenizer with truncation and batch-longest padding enabled
    fn prepare_tokenizer(&self, tokenizer: &Tokenizer, config: &ModelConfig) -> Result<Tokenizer> {
        let existing = tokenizer.get_truncation().cloned().unwrap_or_default();
        let max_length = config
            .max_seq_len
            .or_else(|| tokenizer.get_truncation().map(|t| t.max_length))
            .unwrap_or(DEFAULT_MAX_LENGTH);

        let padding = padding_params(Some(tokenizer), Some(config));

        let mut tokenizer = tokenizer.clone();

        tokenizer.with_truncation(Some(TruncationParams {
            max_length,
            ..existing
        }))?;
        tokenizer.with_padding(Some(padding));

        Ok(tokenizer)
    }
}

impl BenchmarkDataset for TextClassificationBenchmark {
    fn benchmark_config(&self) -> &BenchmarkConfig {
        &self.benchmark_config
    }

    fn context(&self) -> &Context {
        &self.context
    }

    fn compute_metrics<B: Backend>(
        &self,
        predictions_and_labels: PredictionsAndLabels<B>,
        _id2label: Option<&[String]>,
    ) -> Result<Scores> {
        let PredictionsAndLabels {
            predictions,
            labels,
        } = predictions_and_labels;

        let predictions = tensors::argmax_rows(predictions)?;
        let labels = tensors::to_class_ids(labels)?;

        let results = self
            .metrics
            .metric(mcc::KEY)?
            .compute(&predictions, &labels)?;

        let value = results.get(mcc::NAME).copied().ok_or_else(|| {
            Error::Metric(format!(
                "The {} metric did not report {}, found {:?}.",
                mcc::KEY,
                mcc::NAME,
                results.keys().collect::<Vec<_>>()
            ))
        })?;

        Ok(Scores::from([(mcc::KEY.to_string(), value)]))
    }

    fn preprocess_data<D: Dataset<Example>>(
        &self,
        dataset: &D,
        inputs: FrameworkInputs<'_>,
    ) -> Result<InMemDataset<Features>> {
        match inputs {
            FrameworkInputs::PyTorch { tokenizer, config } => {
                let tokenizer = self.prepare_tokenizer(tokenizer, config)?;

                let preprocessed: InMemDataset<Features> = map_batched(
                    dataset,
                    self.benchmark_config.map_batch_size,
                    |examples: Vec<Example>| {
                        let (texts, labels): (Vec<String>, Vec<String>) = examples
                            .into_iter()
                            .map(|example| (example.text, example.label))
                            .unzip();

                        let encodings = tokenizer.encode_batch(
                            texts.iter().map(String::as_str).collect::<Vec<_>>(),
                            true,
                        )?;

                        let class_ids = self.create_numerical_labels(&labels, &config.label2id)?;

                        Ok(encodings
                            .into_iter()
                            .zip(class_ids)
                            .map(|(encoding, label)| {
                                Features::new(
                                    encoding.get_ids().to_vec(),
                                    encoding.get_attention_mask().to_vec(),
                                    encoding.get_type_ids().to_vec(),
                                    label,
                                )
                            })
                            .collect())
                    },
                )?;

                self.context.debug(format_args!(
                    "Preprocessed {} examples for {}",
                    preprocessed.len(),
                    inputs.framework()
                ));

                Ok(preprocessed)
            }

            FrameworkInputs::Spacy => Err(Error::InvalidBenchmark(
                "Evaluation of text predictions for SpaCy models is not yet implemented."
                    .to_string(),
            )),
        }
    }

    fn load_data_collator<B: Backend>(
        &self,
        tokenizer: Option<&Tokenizer>,
        device: &B::Device,
    ) -> Batcher<B> {
        let batcher = Batcher::from_tokenizer(tokenizer, device.clone());

        self.context.debug(format_args!(
            "Padding batches with token id {}",
            batcher.pad_token_id
        ));

        batcher
    }

    fn get_spacy_predictions_and_labels<B: Backend, M, D: Dataset<Example>>(
        &self,
        _model: &M,
        _dataset: &D,
    ) -> Result<PredictionsAndLabels<B>> {
        Err(Error::InvalidBenchmark(
            "Evaluation of text classification tasks for SpaCy models is not yet implemented."
                .to_string(),
        ))
    }
}
