//! Error types for the inference layer.

use thiserror::Error;

/// Errors raised while loading or running a token-classification model.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The model file could not be read or compiled into a session.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// An input tensor could not be built or handed to the runtime.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The runtime rejected or failed the run.
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    /// An output was missing or had an unusable type or shape.
    #[error("failed to extract output: {0}")]
    OutputExtraction(String),
}
