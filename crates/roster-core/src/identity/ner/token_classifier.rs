//! Transformer token-classification recognizer (BERT-style NER).

use std::sync::Arc;

use roster_inference::{InferenceBackend, InputTensor};
use tokenizers::Tokenizer;
use tracing::trace;

use crate::error::RecognizerError;
use crate::models::config::RecognizerConfig;

use super::EntityRecognizer;

/// Runs a token-classification model over a line and decodes BIO-tagged
/// person spans from the predicted labels.
pub struct TokenClassifier<B: InferenceBackend> {
    backend: B,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    max_length: usize,
}

impl<B: InferenceBackend> TokenClassifier<B> {
    pub fn new(backend: B, tokenizer: Tokenizer, labels: Vec<String>, max_length: usize) -> Self {
        Self {
            backend,
            tokenizer,
            labels,
            max_length: max_length.max(1),
        }
    }
}

impl<B: InferenceBackend> EntityRecognizer for TokenClassifier<B> {
    fn id(&self) -> &str {
        "token-classifier"
    }

    fn recognize(&self, line: &str) -> Result<Vec<String>, RecognizerError> {
        if line.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(line, true)
            .map_err(|e| RecognizerError::Tokenize(e.to_string()))?;

        let len = encoding.len().min(self.max_length);
        if len == 0 {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = encoding.get_ids()[..len].iter().map(|&id| id as i64).collect();
        let mut inputs = vec![("input_ids", InputTensor::single_sequence(&ids)?)];

        if self.backend.accepts_input("attention_mask") {
            let mask: Vec<i64> = encoding.get_attention_mask()[..len]
                .iter()
                .map(|&m| m as i64)
                .collect();
            inputs.push(("attention_mask", InputTensor::single_sequence(&mask)?));
        }

        if self.backend.accepts_input("token_type_ids") {
            let types: Vec<i64> = encoding.get_type_ids()[..len]
                .iter()
                .map(|&t| t as i64)
                .collect();
            inputs.push(("token_type_ids", InputTensor::single_sequence(&types)?));
        }

        let outputs = self.backend.run(&inputs)?;
        let (_, logits) = outputs
            .first()
            .ok_or_else(|| RecognizerError::Output("model produced no outputs".to_string()))?;

        let predicted = logits.argmax_labels().ok_or_else(|| {
            RecognizerError::Output(format!("unexpected logits shape {:?}", logits.shape()))
        })?;

        let spans = person_spans(
            line,
            &predicted,
            &encoding.get_offsets()[..len],
            &encoding.get_special_tokens_mask()[..len],
            &self.labels,
        );
        trace!("Token classifier found {:?} in {:?}", spans, line);

        Ok(spans)
    }
}

/// Split a BIO label into its prefix and entity type ("B-PER" -> ("B", "PER")).
fn split_label(label: &str) -> (&str, &str) {
    label.split_once('-').unwrap_or(("", label))
}

/// Merge consecutive PER/PERSON tokens into spans of the original line.
///
/// A `B-` tag that starts exactly where the previous token ended is treated
/// as a word-piece continuation rather than a new entity.
fn person_spans(
    line: &str,
    predicted: &[usize],
    offsets: &[(usize, usize)],
    special: &[u32],
    labels: &[String],
) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    let mut close = |current: &mut Option<(usize, usize)>| {
        if let Some((start, end)) = current.take() {
            if let Some(text) = line.get(start..end).map(str::trim) {
                if !text.is_empty() {
                    spans.push(text.to_string());
                }
            }
        }
    };

    for (i, &label_id) in predicted.iter().enumerate().take(offsets.len()) {
        if special.get(i).copied().unwrap_or(0) == 1 {
            continue;
        }

        let (start, end) = offsets[i];
        let label = labels.get(label_id).map(String::as_str).unwrap_or("O");
        let (prefix, entity) = split_label(label);

        if !matches!(entity, "PER" | "PERSON") {
            close(&mut current);
            continue;
        }

        let continues = matches!(current, Some((_, prev_end)) if prefix != "B" || start == prev_end);
        if continues {
            if let Some(span) = current.as_mut() {
                span.1 = end;
            }
        } else {
            close(&mut current);
            current = Some((start, end));
        }
    }
    close(&mut current);

    spans
}

/// Load the ONNX model and tokenizer named by the configuration.
#[cfg(feature = "native")]
pub fn load_token_classifier(
    config: &RecognizerConfig,
) -> Result<Arc<dyn EntityRecognizer>, RecognizerError> {
    use roster_inference::{OrtBackend, OrtOptions};

    let model_path = config.model_path();
    if !model_path.exists() {
        return Err(RecognizerError::Unavailable(format!(
            "model not found at {}",
            model_path.display()
        )));
    }

    let tokenizer = Tokenizer::from_file(config.tokenizer_path())
        .map_err(|e| RecognizerError::Unavailable(format!("failed to load tokenizer: {e}")))?;

    let backend = OrtBackend::from_file(
        &model_path,
        OrtOptions {
            intra_threads: config.num_threads,
        },
    )?;

    Ok(Arc::new(TokenClassifier::new(
        backend,
        tokenizer,
        config.labels.clone(),
        config.max_length,
    )))
}

/// Load the ONNX model and tokenizer named by the configuration.
#[cfg(not(feature = "native"))]
pub fn load_token_classifier(
    _config: &RecognizerConfig,
) -> Result<Arc<dyn EntityRecognizer>, RecognizerError> {
    Err(RecognizerError::Unavailable(
        "built without the native inference runtime".to_string(),
    ))
}
