use burn::data::dataset::{Dataset, InMemDataset};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A raw text classification record, before numericalisation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Example {
    /// The text for classification
    pub text: String,

    /// The class name of the text
    pub label: String,
}

/// A tokenized text classification record. The original text is not retained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Features {
    /// Token ids produced by the tokenizer
    pub input_ids: Vec<u32>,

    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<u32>,

    /// Segment ids produced by the tokenizer
    pub token_type_ids: Vec<u32>,

    /// The class id of the text
    pub label: usize,
}

impl Features {
    /// The number of tokens, padding included
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// Whether the record holds no tokens at all
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

/// Apply a fallible transformation to consecutive batches of `batch_size` items, collecting
/// the results into a new in-memory dataset.
///
/// The first failing batch aborts the whole mapping, so a partially transformed dataset is
/// never returned.
pub fn map_batched<I, O, D, F>(dataset: &D, batch_size: usize, mut f: F) -> Result<InMemDataset<O>>
where
    D: Dataset<I>,
    I: Send + Sync,
    O: Send + Sync + Clone,
    F: FnMut(Vec<I>) -> Result<Vec<O>>,
{
    let batch_size = batch_size.max(1);

    let mut mapped = Vec::with_capacity(dataset.len());
    let mut batch = Vec::with_capacity(batch_size.min(dataset.len()));

    for item in dataset.iter() {
        batch.push(item);

        if batch.len() == batch_size {
            mapped.extend(f(std::mem::take(&mut batch))?);
        }
    }

    if !batch.is_empty() {
        mapped.extend(f(batch)?);
    }

    Ok(InMemDataset::new(mapped))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn numbers(n: usize) -> InMemDataset<usize> {
        InMemDataset::new((0..n).collect())
    }

    #[test]
    fn test_map_batched_preserves_order() {
        let mut sizes = Vec::new();

        let mapped = map_batched(&numbers(7), 3, |batch: Vec<usize>| {
            sizes.push(batch.len());
            Ok(batch.into_iter().map(|n| n * 10).collect())
        })
        .unwrap();

        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(
            mapped.iter().collect::<Vec<_>>(),
            vec![0, 10, 20, 30, 40, 50, 60]
        );
    }

    #[test]
    fn test_map_batched_aborts_on_failure() {
        let result = map_batched(&numbers(5), 2, |batch: Vec<usize>| {
            if batch.contains(&3) {
                return Err(Error::InvalidBenchmark("three".to_string()));
            }

            Ok(batch)
        });

        assert!(matches!(result, Err(Error::InvalidBenchmark(_))));
    }

    #[test]
    fn test_map_batched_empty() {
        let mapped = map_batched(&numbers(0), 4, |batch: Vec<usize>| Ok(batch)).unwrap();

        assert!(mapped.is_empty());
    }
}
