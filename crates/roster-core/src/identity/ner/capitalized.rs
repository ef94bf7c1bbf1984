//! Model-free chunker over runs of capitalized words.

use crate::error::RecognizerError;

use super::EntityRecognizer;

/// Capitalized words that start or join phrases but are not names.
const STOP_WORDS: [&str; 29] = [
    "the", "a", "an", "and", "or", "of", "in", "at", "on", "for", "to", "with", "by", "from", "my",
    "i", "january", "february", "march", "july", "august", "september", "october", "november",
    "december", "monday", "friday", "street", "road",
];

const MAX_RUN: usize = 4;

/// Proposes every run of two to four consecutive capitalized words.
///
/// Punctuation attached to a word closes the run after that word.
#[derive(Debug, Clone, Default)]
pub struct CapitalizedRunRecognizer;

impl CapitalizedRunRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn is_name_like(word: &str) -> bool {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            return false;
        };

        first.is_uppercase()
            && word.chars().count() >= 2
            && chars.all(|c| c.is_alphabetic() || c == '-' || c == '\'')
            && !STOP_WORDS.contains(&word.to_lowercase().as_str())
    }
}

impl EntityRecognizer for CapitalizedRunRecognizer {
    fn id(&self) -> &str {
        "capitalized-runs"
    }

    fn recognize(&self, line: &str) -> Result<Vec<String>, RecognizerError> {
        let mut spans = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        let mut flush = |run: &mut Vec<&str>| {
            if (2..=MAX_RUN).contains(&run.len()) {
                spans.push(run.join(" "));
            }
            run.clear();
        };

        for raw in line.split_whitespace() {
            let word = raw.trim_start_matches(['(', '"', '[', '\'']);
            let closes = word.ends_with([',', ';', ':', '.', ')', ']', '"', '|', '!', '?']);
            let word = word.trim_end_matches([',', ';', ':', '.', ')', ']', '"', '|', '!', '?']);

            if Self::is_name_like(word) {
                run.push(word);
                if closes {
                    flush(&mut run);
                }
            } else {
                flush(&mut run);
            }
        }
        flush(&mut run);

        Ok(spans)
    }
}
