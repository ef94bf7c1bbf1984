//! ONNX inference abstraction layer for roster.
//!
//! Token-classification models (BERT-style NER) take integer id tensors and
//! produce per-token logits. This crate hides the runtime behind
//! [`InferenceBackend`] so recognizers can be tested against a stub and run
//! natively through `ort`.

mod backend;
mod error;
mod tensor;

pub use backend::InferenceBackend;
pub use error::InferenceError;
pub use tensor::{InputTensor, OutputTensor};

#[cfg(feature = "native")]
pub use backend::ort::{OrtBackend, OrtOptions};

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
