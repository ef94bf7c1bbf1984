//! Candidate name generation for a page.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::ner::EntityRecognizer;
use super::rules::{is_header_line, PatternMatcher, PatternRule};

/// The technique that proposed a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Technique {
    Pattern(PatternRule),
    /// Entity recognizer, by backend id.
    Entity(String),
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technique::Pattern(rule) => write!(f, "pattern:{}", rule.id()),
            Technique::Entity(id) => write!(f, "entity:{}", id),
        }
    }
}

/// An unvalidated proposed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCandidate {
    pub text: String,
    pub technique: Technique,
}

/// A producer of name candidates for a single line.
#[derive(Clone)]
pub enum CandidateSource {
    Patterns(PatternMatcher),
    Entities(Arc<dyn EntityRecognizer>),
}

impl CandidateSource {
    /// Candidates this source proposes for a line.
    ///
    /// A failing recognizer contributes nothing for the line.
    pub fn propose(&self, line: &str) -> Vec<NameCandidate> {
        match self {
            CandidateSource::Patterns(matcher) => matcher
                .find(line)
                .into_iter()
                .map(|(rule, text)| NameCandidate {
                    text,
                    technique: Technique::Pattern(rule),
                })
                .collect(),
            CandidateSource::Entities(recognizer) => match recognizer.recognize(line) {
                Ok(spans) => spans
                    .into_iter()
                    .map(|text| NameCandidate {
                        text,
                        technique: Technique::Entity(recognizer.id().to_string()),
                    })
                    .collect(),
                Err(e) => {
                    debug!("Recognizer {} failed on {:?}: {}", recognizer.id(), line, e);
                    Vec::new()
                }
            },
        }
    }
}

impl fmt::Debug for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Patterns(matcher) => f.debug_tuple("Patterns").field(matcher).finish(),
            CandidateSource::Entities(recognizer) => {
                f.debug_tuple("Entities").field(&recognizer.id()).finish()
            }
        }
    }
}

/// Candidates of one page in discovery order, unique by exact text.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: Vec<NameCandidate>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate; returns false if the same text was already present.
    pub fn insert(&mut self, candidate: NameCandidate) -> bool {
        if !self.seen.insert(candidate.text.clone()) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameCandidate> {
        self.candidates.iter()
    }

    /// Candidate texts in discovery order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.text.as_str())
    }
}

/// Runs every source over the header window of a page.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    sources: Vec<CandidateSource>,
    header_lines: usize,
}

impl CandidateGenerator {
    pub fn new(sources: Vec<CandidateSource>) -> Self {
        Self {
            sources,
            header_lines: 7,
        }
    }

    /// Set how many non-blank lines from the top of a page are considered.
    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// The trimmed, non-blank lines examined for names, header lines excluded.
    pub fn window<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.header_lines)
            .filter(|line| !is_header_line(line))
    }

    /// Candidates for the page, by line then by source order.
    pub fn generate(&self, text: &str) -> CandidateSet {
        let mut set = CandidateSet::new();
        for line in self.window(text) {
            for source in &self.sources {
                for candidate in source.propose(line) {
                    set.insert(candidate);
                }
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizerError;
    use crate::identity::ner::CapitalizedRunRecognizer;
    use pretty_assertions::assert_eq;

    struct FailingRecognizer;

    impl EntityRecognizer for FailingRecognizer {
        fn id(&self) -> &str {
            "failing"
        }

        fn recognize(&self, _line: &str) -> Result<Vec<String>, RecognizerError> {
            Err(RecognizerError::Unavailable("no model".to_string()))
        }
    }

    fn generator() -> CandidateGenerator {
        CandidateGenerator::new(vec![
            CandidateSource::Patterns(PatternMatcher::new()),
            CandidateSource::Entities(Arc::new(CapitalizedRunRecognizer::new())),
        ])
    }

    #[test]
    fn test_duplicates_collapse_first_wins() {
        let set = generator().generate("John Smith");
        let texts: Vec<&str> = set.texts().collect();
        assert_eq!(texts, vec!["John Smith"]);
        assert_eq!(
            set.iter().next().unwrap().technique,
            Technique::Pattern(PatternRule::TitleCaseLine)
        );
    }

    #[test]
    fn test_header_lines_skipped() {
        let set = generator().generate("Resume of John Smith\n\nJane Doe");
        let texts: Vec<&str> = set.texts().collect();
        assert_eq!(texts, vec!["Jane Doe"]);
    }

    #[test]
    fn test_window_counts_non_blank_lines() {
        let text = "one\n\n  two  \nthree\nfour\nfive\nsix\nseven\nJohn Smith";
        let candidates = generator();
        assert_eq!(candidates.window(text).count(), 7);
        assert!(candidates.generate(text).is_empty());

        let candidates = generator().with_header_lines(8);
        assert_eq!(candidates.generate(text).texts().collect::<Vec<_>>(), vec!["John Smith"]);
    }

    #[test]
    fn test_failing_recognizer_contributes_nothing() {
        let candidates = CandidateGenerator::new(vec![
            CandidateSource::Entities(Arc::new(FailingRecognizer)),
            CandidateSource::Patterns(PatternMatcher::new()),
        ]);
        let set = candidates.generate("Jane Doe");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.iter().next().unwrap().technique.to_string(),
            "pattern:title_case_line"
        );
    }
}
