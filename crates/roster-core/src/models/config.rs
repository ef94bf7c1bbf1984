//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the roster pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Candidate detection and aggregation settings.
    pub extraction: ExtractionConfig,

    /// Entity recognizer backends.
    pub recognizers: RecognizerConfig,

    /// Document reader settings.
    pub reader: ReaderConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// What the page aggregator does with an email or phone found without a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoneFields {
    /// Drop the page unless it has a name or both email and phone.
    #[default]
    Drop,
    /// Emit a partial record for any page with at least one field.
    Keep,
}

/// When the cross-page reconciler emits a contact record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitPolicy {
    /// As soon as a name has an email or a phone.
    #[default]
    FirstContact,
    /// Once a name has both an email and a phone, when a new name arrives,
    /// or at the end of the document.
    AllFields,
}

/// Candidate detection and aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading non-blank lines per page searched for names.
    pub header_lines: usize,

    /// Minimum whitespace-separated tokens in an accepted name.
    pub min_name_tokens: usize,

    /// Minimum character length of an accepted name.
    pub min_name_length: usize,

    /// Handling of pages carrying only an email or only a phone.
    pub lone_fields: LoneFields,

    /// Reconciler emission rule.
    pub emit: EmitPolicy,

    /// Analyze pages on the rayon thread pool.
    pub parallel_pages: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_lines: 7,
            min_name_tokens: 2,
            min_name_length: 4,
            lone_fields: LoneFields::Drop,
            emit: EmitPolicy::FirstContact,
            parallel_pages: true,
        }
    }
}

/// Entity recognizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Enable the model-free capitalized-run chunker.
    pub capitalized_runs: bool,

    /// Enable the ONNX token-classification model.
    pub token_classifier: bool,

    /// Directory containing the token-classification model files.
    pub model_dir: PathBuf,

    /// ONNX model file name.
    pub model_file: String,

    /// Tokenizer definition file name (HuggingFace `tokenizer.json`).
    pub tokenizer_file: String,

    /// Label names indexed by the model's output class id.
    pub labels: Vec<String>,

    /// Maximum token sequence length fed to the model.
    pub max_length: usize,

    /// Intra-op threads for the ONNX session.
    pub num_threads: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            capitalized_runs: true,
            token_classifier: false,
            model_dir: PathBuf::from("models").join("ner"),
            model_file: "model.onnx".to_string(),
            tokenizer_file: "tokenizer.json".to_string(),
            labels: ["O", "B-MISC", "I-MISC", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_length: 128,
            num_threads: 1,
        }
    }
}

impl RecognizerConfig {
    /// Full path to the ONNX model.
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    /// Full path to the tokenizer definition.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(&self.tokenizer_file)
    }
}

/// Document reader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Non-blank Word paragraphs grouped into one pseudo-page.
    pub paragraphs_per_page: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            paragraphs_per_page: 5,
        }
    }
}

/// Roster output file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    #[default]
    Xlsx,
    Csv,
    Json,
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when none is given on the command line.
    pub format: OutputKind,

    /// Default output path.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputKind::Xlsx,
            path: PathBuf::from("output").join("output.xlsx"),
        }
    }
}

impl RosterConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RosterConfig =
            serde_json::from_str(r#"{"extraction": {"lone_fields": "keep"}}"#).unwrap();
        assert_eq!(config.extraction.lone_fields, LoneFields::Keep);
        assert_eq!(config.extraction.emit, EmitPolicy::FirstContact);
        assert_eq!(config.extraction.header_lines, 7);
        assert!(config.recognizers.capitalized_runs);
        assert_eq!(config.output.format, OutputKind::Xlsx);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RosterConfig::default();
        config.reader.paragraphs_per_page = 3;
        config.output.format = OutputKind::Csv;
        config.save(&path).unwrap();

        let loaded = RosterConfig::from_file(&path).unwrap();
        assert_eq!(loaded.reader.paragraphs_per_page, 3);
        assert_eq!(loaded.output.format, OutputKind::Csv);
    }

    #[test]
    fn test_model_paths() {
        let config = RecognizerConfig::default();
        assert_eq!(config.model_path(), PathBuf::from("models/ner/model.onnx"));
        assert_eq!(config.tokenizer_path(), PathBuf::from("models/ner/tokenizer.json"));
    }
}
