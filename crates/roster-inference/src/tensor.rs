//! Tensor types for inference input/output.

use ndarray::{ArrayD, Axis, IxDyn};

use crate::{InferenceError, Result};

/// Integer input tensor for inference.
///
/// Token-classification models only ever receive int64 tensors
/// (`input_ids`, `attention_mask`, `token_type_ids`).
#[derive(Debug, Clone)]
pub struct InputTensor(ArrayD<i64>);

impl InputTensor {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// The tensor values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Create a tensor from raw data and shape.
    pub fn from_i64(data: Vec<i64>, shape: &[usize]) -> Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(InputTensor)
            .map_err(|e| InferenceError::InvalidInput(e.to_string()))
    }

    /// Build a `[1, len]` batch from a single token sequence.
    pub fn single_sequence(ids: &[i64]) -> Result<Self> {
        Self::from_i64(ids.to_vec(), &[1, ids.len()])
    }
}

/// Output tensor from inference: logits, or label ids for models that
/// fold the argmax into the graph.
#[derive(Debug, Clone)]
pub enum OutputTensor {
    Float32(ArrayD<f32>),
    Int64(ArrayD<i64>),
}

impl OutputTensor {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        match self {
            OutputTensor::Float32(arr) => arr.shape(),
            OutputTensor::Int64(arr) => arr.shape(),
        }
    }

    /// Per-token label ids.
    ///
    /// Accepts `[1, seq, labels]` logits (argmax per token) or `[1, seq]`
    /// label ids. Anything else yields `None`.
    pub fn argmax_labels(&self) -> Option<Vec<usize>> {
        match self {
            OutputTensor::Float32(logits) => {
                if logits.ndim() != 3 || logits.shape()[0] != 1 {
                    return None;
                }
                let sequence = logits.index_axis(Axis(0), 0);
                let labels = sequence
                    .axis_iter(Axis(0))
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .fold((0usize, f32::NEG_INFINITY), |best, (idx, &score)| {
                                if score > best.1 { (idx, score) } else { best }
                            })
                            .0
                    })
                    .collect();
                Some(labels)
            }
            OutputTensor::Int64(ids) => {
                if ids.ndim() != 2 || ids.shape()[0] != 1 {
                    return None;
                }
                Some(ids.iter().map(|&id| id.max(0) as usize).collect())
            }
        }
    }
}
