use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

use crate::error::{Error, Result};

/// Pad each sequence to a specific length with the given pad value, typically the longest
/// sequence in a batch
pub fn pad_to<B: Backend>(
    pad_value: u32,
    values_list: Vec<Vec<u32>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = values_list.len();

    let mut tensor = Tensor::zeros([batch_size, seq_length], device);
    tensor = tensor.add_scalar(pad_value as i64);

    for (index, mut values) in values_list.into_iter().enumerate() {
        values.truncate(seq_length);

        let length = values.len();
        if length == 0 {
            continue;
        }

        tensor = tensor.slice_assign(
            [index..index + 1, 0..length],
            Tensor::from_data(
                Data::new(
                    values.into_iter().map(|e| (e as i64).elem()).collect(),
                    Shape::new([1, length]),
                ),
                device,
            ),
        );
    }

    tensor
}

/// Build a 1D integer tensor from a list of class ids
pub fn class_ids<B: Backend>(ids: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    Tensor::from_data(
        Data::new(
            ids.iter().map(|id| (*id as i64).elem()).collect(),
            Shape::new([ids.len()]),
        ),
        device,
    )
}

/// Read a 1D integer tensor back into a list of class ids
pub fn to_class_ids<B: Backend>(tensor: Tensor<B, 1, Int>) -> Result<Vec<usize>> {
    tensor
        .into_data()
        .convert::<i64>()
        .value
        .into_iter()
        .map(|id| {
            usize::try_from(id)
                .map_err(|_| Error::Metric(format!("{} is not a valid class id", id)))
        })
        .collect()
}

/// Find the index of the highest score in each row of a [batch_size, n_classes] tensor.
/// Ties resolve to the lowest index, and a row containing NaN picks its first NaN.
pub fn argmax_rows<B: Backend>(scores: Tensor<B, 2>) -> Result<Vec<usize>> {
    let [batch_size, n_classes] = scores.dims();

    if n_classes == 0 {
        return Err(Error::Metric(format!(
            "predictions for {} examples contain no class scores",
            batch_size
        )));
    }

    let values = scores.into_data().convert::<f32>().value;

    let predictions = values
        .chunks(n_classes)
        .map(|row| {
            // A NaN score wins its row
            if let Some(index) = row.iter().position(|score| score.is_nan()) {
                return index;
            }

            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |(best, max), (index, &score)| {
                    if score > max {
                        (index, score)
                    } else {
                        (best, max)
                    }
                })
                .0
        })
        .collect();

    Ok(predictions)
}
