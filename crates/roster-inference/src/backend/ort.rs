//! ONNX Runtime backend.

use std::path::Path;
use std::sync::Mutex;

use ndarray::{ArrayD, IxDyn};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use tracing::{debug, trace};

use crate::error::InferenceError;
use crate::tensor::{InputTensor, OutputTensor};
use crate::{InferenceBackend, Result};

/// Session options for [`OrtBackend`].
#[derive(Debug, Clone, Copy)]
pub struct OrtOptions {
    /// Intra-op thread count.
    pub intra_threads: usize,
}

impl Default for OrtOptions {
    fn default() -> Self {
        Self { intra_threads: 1 }
    }
}

/// A token-classification model loaded into ONNX Runtime.
///
/// `Session::run` needs exclusive access, so concurrent page workers
/// serialize on the session lock.
pub struct OrtBackend {
    session: Mutex<Session>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl OrtBackend {
    /// Load a model from an `.onnx` file.
    pub fn from_file<P: AsRef<Path>>(path: P, options: OrtOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(
            "Loading ONNX model from {} ({} intra-op threads)",
            path.display(),
            options.intra_threads
        );

        let session = Session::builder()
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?
            .with_intra_threads(options.intra_threads.max(1))
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| InferenceError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        let input_names: Vec<String> = session.inputs().iter().map(|i| i.name().to_string()).collect();
        let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();
        debug!("Model inputs: {:?}, outputs: {:?}", input_names, output_names);

        Ok(Self {
            session: Mutex::new(session),
            input_names,
            output_names,
        })
    }

    fn to_session_input(tensor: &InputTensor) -> Result<SessionInputValue<'static>> {
        let shape: Vec<i64> = tensor.shape().iter().map(|&d| d as i64).collect();
        let value: std::result::Result<SessionInputValue<'static>, ort::Error> =
            Tensor::from_array((shape, tensor.values().collect::<Vec<i64>>())).map(Into::into);
        value.map_err(|e| InferenceError::InvalidInput(e.to_string()))
    }
}

fn dims(shape: &[i64]) -> IxDyn {
    IxDyn(&shape.iter().map(|&d| d.max(0) as usize).collect::<Vec<_>>())
}

impl InferenceBackend for OrtBackend {
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>> {
        let feeds = inputs
            .iter()
            .map(|(name, tensor)| Ok((*name, Self::to_session_input(tensor)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| InferenceError::InferenceFailed(format!("session lock poisoned: {}", e)))?;
        let outputs = session
            .run(feeds)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let mut results = Vec::with_capacity(outputs.len());
        for (name, value) in outputs.iter() {
            // Classifiers emit float logits; some exports fold the argmax in
            // and return label ids instead.
            let array = if let Ok((shape, data)) = value.try_extract_tensor::<f32>() {
                ArrayD::from_shape_vec(dims(shape), data.to_vec()).map(OutputTensor::Float32)
            } else if let Ok((shape, data)) = value.try_extract_tensor::<i64>() {
                ArrayD::from_shape_vec(dims(shape), data.to_vec()).map(OutputTensor::Int64)
            } else {
                return Err(InferenceError::OutputExtraction(format!(
                    "output '{}' is neither f32 logits nor i64 label ids",
                    name
                )));
            };
            let tensor = array.map_err(|e| InferenceError::OutputExtraction(e.to_string()))?;

            trace!("Output {} has shape {:?}", name, tensor.shape());
            results.push((name.to_string(), tensor));
        }

        Ok(results)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
