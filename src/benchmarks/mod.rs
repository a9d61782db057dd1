use burn::{
    data::{
        dataloader::DataLoaderBuilder,
        dataset::{Dataset, InMemDataset},
    },
    tensor::{backend::Backend, Int, Tensor},
    train::ClassificationOutput,
};
use derive_new::new;
use tokenizers::Tokenizer;

use crate::{
    datasets::{Example, Features},
    error::{Error, Result},
    frameworks::FrameworkInputs,
    logging::Context,
    metrics::Scores,
};

/// Batching for tokenized records
pub mod batcher;

/// Model, dataset and run configuration
pub mod config;

/// Text Classification
pub mod text_classification;

pub use batcher::{Batch, Batcher};
pub use config::{BenchmarkConfig, DatasetConfig, ModelConfig};
pub use text_classification::TextClassificationBenchmark;

/// Raw class scores paired with the gold class ids they are evaluated against
#[derive(Debug, Clone, new)]
pub struct PredictionsAndLabels<B: Backend> {
    /// Class scores: [n_examples, n_classes]
    pub predictions: Tensor<B, 2>,

    /// Gold class ids: [n_examples]
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> From<ClassificationOutput<B>> for PredictionsAndLabels<B> {
    fn from(output: ClassificationOutput<B>) -> Self {
        Self::new(output.output, output.targets)
    }
}

/// A model that produces class scores for a padded batch
pub trait Classifier<B: Backend> {
    /// Defines forward pass for inference, returning scores: [batch_size, n_classes]
    fn infer(&self, batch: Batch<B>) -> Tensor<B, 2>;
}

impl<B: Backend, F> Classifier<B> for F
where
    F: Fn(Batch<B>) -> Tensor<B, 2>,
{
    fn infer(&self, batch: Batch<B>) -> Tensor<B, 2> {
        self(batch)
    }
}

/// The hooks a task must provide to be run by the benchmark driver
pub trait BenchmarkDataset {
    /// Settings for the run
    fn benchmark_config(&self) -> &BenchmarkConfig;

    /// Logging context for the run
    fn context(&self) -> &Context;

    /// Compute the metrics needed for evaluation. `id2label` is available for tasks that
    /// need class names.
    fn compute_metrics<B: Backend>(
        &self,
        predictions_and_labels: PredictionsAndLabels<B>,
        id2label: Option<&[String]>,
    ) -> Result<Scores>;

    /// Prepare a raw dataset for the given framework
    fn preprocess_data<D: Dataset<Example>>(
        &self,
        dataset: &D,
        inputs: FrameworkInputs<'_>,
    ) -> Result<InMemDataset<Features>>;

    /// Load the batcher used to collate preprocessed records
    fn load_data_collator<B: Backend>(
        &self,
        tokenizer: Option<&Tokenizer>,
        device: &B::Device,
    ) -> Batcher<B>;

    /// Get predictions from a SpaCy pipeline on the dataset
    fn get_spacy_predictions_and_labels<B: Backend, M, D: Dataset<Example>>(
        &self,
        model: &M,
        dataset: &D,
    ) -> Result<PredictionsAndLabels<B>>;
}

/// Run a benchmark end to end: preprocess, collate, infer, then score
pub fn evaluate<B, T, M, D>(
    benchmark: &T,
    model: &M,
    dataset: &D,
    tokenizer: &Tokenizer,
    config: &ModelConfig,
    device: &B::Device,
) -> Result<Scores>
where
    B: Backend,
    T: BenchmarkDataset,
    M: Classifier<B>,
    D: Dataset<Example>,
{
    let context = benchmark.context();

    // Preprocessing and collation must agree on the pad id
    let tokenizer = &batcher::padded_tokenizer(tokenizer, config);

    let preprocessed =
        benchmark.preprocess_data(dataset, FrameworkInputs::PyTorch { tokenizer, config })?;

    if preprocessed.is_empty() {
        return Err(Error::InvalidBenchmark(format!(
            "The dataset {} contains no examples to evaluate.",
            context.dataset
        )));
    }

    let batcher = benchmark.load_data_collator::<B>(Some(tokenizer), device);

    let dataloader = DataLoaderBuilder::new(batcher)
        .batch_size(benchmark.benchmark_config().batch_size)
        .build(preprocessed);

    let mut scores_list = Vec::new();
    let mut labels_list = Vec::new();

    for batch in dataloader.iter() {
        labels_list.push(batch.labels.clone());
        scores_list.push(model.infer(batch));
    }

    context.debug(format_args!(
        "Collected predictions for {} batches",
        scores_list.len()
    ));

    let predictions_and_labels =
        PredictionsAndLabels::new(Tensor::cat(scores_list, 0), Tensor::cat(labels_list, 0));

    let id2label = config.id2label();
    let scores = benchmark.compute_metrics(predictions_and_labels, Some(&id2label))?;

    context.info(format_args!("Scores: {:?}", scores));

    Ok(scores)
}
