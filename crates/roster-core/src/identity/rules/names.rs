//! Rule-based name candidate detection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::patterns::*;

/// Textual rules that propose name candidates from a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    LabeledName,
    LabeledApplicant,
    Honorific,
    TitleCaseLine,
    TrailingInitial,
    DoubleTrailingInitial,
    MiddleInitial,
    Particle,
    Relational,
    Apostrophe,
    Hyphenated,
}

impl PatternRule {
    /// All rules, in application order.
    pub const ALL: [PatternRule; 11] = [
        PatternRule::LabeledName,
        PatternRule::LabeledApplicant,
        PatternRule::Honorific,
        PatternRule::TitleCaseLine,
        PatternRule::TrailingInitial,
        PatternRule::DoubleTrailingInitial,
        PatternRule::MiddleInitial,
        PatternRule::Particle,
        PatternRule::Relational,
        PatternRule::Apostrophe,
        PatternRule::Hyphenated,
    ];

    /// Stable identifier used in logs and candidate provenance.
    pub fn id(self) -> &'static str {
        match self {
            PatternRule::LabeledName => "labeled_name",
            PatternRule::LabeledApplicant => "labeled_applicant",
            PatternRule::Honorific => "honorific",
            PatternRule::TitleCaseLine => "title_case_line",
            PatternRule::TrailingInitial => "trailing_initial",
            PatternRule::DoubleTrailingInitial => "double_trailing_initial",
            PatternRule::MiddleInitial => "middle_initial",
            PatternRule::Particle => "particle",
            PatternRule::Relational => "relational",
            PatternRule::Apostrophe => "apostrophe",
            PatternRule::Hyphenated => "hyphenated",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            PatternRule::LabeledName => &*LABELED_NAME,
            PatternRule::LabeledApplicant => &*LABELED_APPLICANT,
            PatternRule::Honorific => &*HONORIFIC_NAME,
            PatternRule::TitleCaseLine => &*TITLE_CASE_LINE,
            PatternRule::TrailingInitial => &*TRAILING_INITIAL,
            PatternRule::DoubleTrailingInitial => &*DOUBLE_TRAILING_INITIAL,
            PatternRule::MiddleInitial => &*MIDDLE_INITIAL,
            PatternRule::Particle => &*PARTICLE_NAME,
            PatternRule::Relational => &*RELATIONAL_NAME,
            PatternRule::Apostrophe => &*APOSTROPHE_NAME,
            PatternRule::Hyphenated => &*HYPHENATED_NAME,
        }
    }
}

/// Applies every [`PatternRule`] to a line.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    rules: Vec<PatternRule>,
    min_tokens: usize,
}

impl PatternMatcher {
    /// Create a matcher running all rules.
    pub fn new() -> Self {
        Self {
            rules: PatternRule::ALL.to_vec(),
            min_tokens: 2,
        }
    }

    /// Restrict the matcher to the given rules.
    pub fn with_rules(mut self, rules: &[PatternRule]) -> Self {
        self.rules = rules.to_vec();
        self
    }

    /// Set the minimum number of tokens a match needs to be proposed.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Propose candidates from one line, tagged with the rule that found them.
    ///
    /// Every rule fires; the same string may come back from several rules.
    pub fn find(&self, line: &str) -> Vec<(PatternRule, String)> {
        let mut found = Vec::new();

        for &rule in &self.rules {
            for caps in rule.regex().captures_iter(line) {
                let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
                    continue;
                };
                let name = m.as_str().trim();
                if name.split_whitespace().count() >= self.min_tokens {
                    trace!("Rule {} proposed {:?}", rule.id(), name);
                    found.push((rule, name.to_string()));
                }
            }
        }

        found
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}
