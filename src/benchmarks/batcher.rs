use burn::{
    data::dataloader,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use derive_new::new;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer};

use crate::{datasets::Features, utils::tensors};

use super::ModelConfig;

/// The pad token assumed when the tokenizer has no padding settings
pub static PAD_TOKEN: &str = "[PAD]";

/// A padded batch of tokenized text classification records
#[derive(Debug, Clone, new)]
pub struct Batch<B: Backend> {
    /// Token ids as 2D tensor: [batch_size, seq_length]
    pub input_ids: Tensor<B, 2, Int>,

    /// 1 for real tokens, 0 for padding: [batch_size, seq_length]
    pub attention_mask: Tensor<B, 2, Int>,

    /// Segment ids: [batch_size, seq_length]
    pub token_type_ids: Tensor<B, 2, Int>,

    /// Padding mask containing booleans for padding locations
    pub mask_pad: Tensor<B, 2, Bool>,

    /// Class ids for the batch
    pub labels: Tensor<B, 1, Int>,
}

/// Collates tokenized records into batches padded to the longest sequence of each batch
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// ID of the padding token
    pub pad_token_id: u32,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a batcher following the padding convention of the given tokenizer
    pub fn from_tokenizer(tokenizer: Option<&Tokenizer>, device: B::Device) -> Self {
        Self::new(padding_params(tokenizer, None).pad_id, device)
    }
}

/// Resolve the padding convention for a run, always padding to the longest sequence.
///
/// The tokenizer's own padding settings win. Otherwise the model config's pad token id is
/// used, and without a config the id of the conventional pad token, then 0.
pub fn padding_params(tokenizer: Option<&Tokenizer>, config: Option<&ModelConfig>) -> PaddingParams {
    if let Some(padding) = tokenizer.and_then(|tokenizer| tokenizer.get_padding()) {
        return PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..padding.clone()
        };
    }

    let pad_id = match config {
        Some(config) => config.pad_token_id,
        None => tokenizer
            .and_then(|tokenizer| tokenizer.token_to_id(PAD_TOKEN))
            .unwrap_or(0),
    };

    PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        pad_id,
        pad_token: tokenizer
            .and_then(|tokenizer| tokenizer.id_to_token(pad_id))
            .unwrap_or_else(|| PAD_TOKEN.to_string()),
        ..Default::default()
    }
}

/// Clone the tokenizer with the padding convention resolved for the given model config, so
/// that preprocessing and batching pad with the same id
pub fn padded_tokenizer(tokenizer: &Tokenizer, config: &ModelConfig) -> Tokenizer {
    let mut padded = tokenizer.clone();
    padded.with_padding(Some(padding_params(Some(tokenizer), Some(config))));

    padded
}

/// Implement Batcher trait for Batcher struct for evaluation
impl<B: Backend> dataloader::batcher::Batcher<Features, Batch<B>> for Batcher<B> {
    /// Pads a vector of tokenized records into a batch
    fn batch(&self, items: Vec<Features>) -> Batch<B> {
        let batch_size = items.len();
        let seq_length = items.iter().map(Features::len).max().unwrap_or(0);

        let mut input_ids_list = Vec::with_capacity(batch_size);
        let mut attention_mask_list = Vec::with_capacity(batch_size);
        let mut token_type_ids_list = Vec::with_capacity(batch_size);
        let mut labels = Vec::with_capacity(batch_size);

        for item in items {
            input_ids_list.push(item.input_ids);
            attention_mask_list.push(item.attention_mask);
            token_type_ids_list.push(item.token_type_ids);
            labels.push(item.label);
        }

        let input_ids =
            tensors::pad_to::<B>(self.pad_token_id, input_ids_list, seq_length, &self.device);
        let attention_mask =
            tensors::pad_to::<B>(0, attention_mask_list, seq_length, &self.device);
        let token_type_ids =
            tensors::pad_to::<B>(0, token_type_ids_list, seq_length, &self.device);

        let mask_pad = attention_mask.clone().equal_elem(0_i64);

        Batch {
            input_ids,
            attention_mask,
            token_type_ids,
            mask_pad,
            labels: tensors::class_ids::<B>(&labels, &self.device),
        }
    }
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, data::dataloader::batcher::Batcher as _};
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    fn features(input_ids: Vec<u32>, label: usize) -> Features {
        let len = input_ids.len();

        Features::new(input_ids, vec![1; len], vec![0; len], label)
    }

    #[test]
    fn test_pads_to_longest_in_batch() {
        let batcher = Batcher::<TestBackend>::new(7, Default::default());

        let batch = batcher.batch(vec![
            features(vec![1, 2], 0),
            features(vec![3, 4, 5, 6], 1),
            features(vec![8], 1),
        ]);

        assert_eq!(batch.input_ids.dims(), [3, 4]);
        assert_eq!(
            batch.input_ids.into_data().convert::<i64>().value,
            vec![1, 2, 7, 7, 3, 4, 5, 6, 8, 7, 7, 7]
        );
        assert_eq!(
            batch.attention_mask.into_data().convert::<i64>().value,
            vec![1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0]
        );
        assert_eq!(
            batch.mask_pad.into_data().value,
            vec![false, false, true, true, false, false, false, false, false, true, true, true]
        );
        assert_eq!(
            batch.labels.into_data().convert::<i64>().value,
            vec![0, 1, 1]
        );
    }

    #[test]
    fn test_length_follows_each_batch() {
        let batcher = Batcher::<TestBackend>::new(0, Default::default());

        let short = batcher.batch(vec![features(vec![1], 0), features(vec![2, 3], 1)]);
        let long = batcher.batch(vec![features(vec![1, 2, 3, 4, 5], 0)]);

        assert_eq!(short.input_ids.dims(), [2, 2]);
        assert_eq!(long.input_ids.dims(), [1, 5]);
    }

    #[test]
    fn test_padding_without_tokenizer() {
        assert_eq!(padding_params(None, None).pad_id, 0);

        let config = ModelConfig::new(Default::default()).with_pad_token_id(9);
        assert_eq!(padding_params(None, Some(&config)).pad_id, 9);
    }
}
