//! Entity recognizers proposing PERSON spans.

mod capitalized;
mod token_classifier;

pub use capitalized::CapitalizedRunRecognizer;
pub use token_classifier::{load_token_classifier, TokenClassifier};

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::RecognizerError;
use crate::models::config::RecognizerConfig;

/// A backend that labels spans of a line as PERSON.
///
/// Implementations are loaded once and shared between page workers.
pub trait EntityRecognizer: Send + Sync {
    /// Backend identifier recorded on every candidate it produces.
    fn id(&self) -> &str;

    /// Person-name spans found in the line, in line order.
    fn recognize(&self, line: &str) -> Result<Vec<String>, RecognizerError>;
}

/// Build the recognizers enabled in the configuration.
///
/// A backend that cannot be loaded is logged and left out; the pipeline
/// then runs with whatever remains.
pub fn recognizers_from_config(config: &RecognizerConfig) -> Vec<Arc<dyn EntityRecognizer>> {
    let mut recognizers: Vec<Arc<dyn EntityRecognizer>> = Vec::new();

    if config.capitalized_runs {
        recognizers.push(Arc::new(CapitalizedRunRecognizer::new()));
    }

    if config.token_classifier {
        match load_token_classifier(config) {
            Ok(recognizer) => {
                info!("Loaded token classifier from {}", config.model_dir.display());
                recognizers.push(recognizer);
            }
            Err(e) => warn!("Token classifier unavailable, continuing without it: {}", e),
        }
    }

    recognizers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_skipped() {
        let config = RecognizerConfig {
            token_classifier: true,
            model_dir: "/nonexistent/roster-models".into(),
            ..Default::default()
        };
        let recognizers = recognizers_from_config(&config);
        let ids: Vec<&str> = recognizers.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["capitalized-runs"]);
    }

    #[test]
    fn test_all_disabled() {
        let config = RecognizerConfig {
            capitalized_runs: false,
            ..Default::default()
        };
        assert!(recognizers_from_config(&config).is_empty());
    }
}
