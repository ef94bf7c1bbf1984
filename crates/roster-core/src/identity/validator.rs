//! Acceptance rules for person names.

use tracing::trace;

use crate::models::contact::ValidatedName;

use super::human_name::HumanName;

/// Section-header and relational words that never appear in a real name.
pub const BLOCKED_WORDS: [&str; 30] = [
    "resume", "cv", "curriculum", "vitae", "email", "phone", "address", "education", "experience",
    "skills", "objective", "summary", "references", "page", "contact", "profile", "name",
    "candidate", "applicant", "date", "birth", "gender", "nationality", "status", "declaration",
    "place", "current", "permanent", "father", "mother",
];

/// Characters that disqualify a name.
pub const FORBIDDEN_CHARS: &str = "!@#$%^&*()_+={}[]|\\:;\"<>,.?/~`";

/// Why a candidate was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The splitter found no first or no last name.
    Unparseable,
    TooShort,
    BlockedWord,
    /// Contains an ASCII digit (`0-9`); other numeric characters pass.
    Digit,
    Lowercase,
    Punctuation,
    /// A hyphen or apostrophe part is empty or not capitalized.
    CompoundPart,
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// Filters raw candidates down to plausible person names.
#[derive(Debug, Clone)]
pub struct NameValidator {
    min_tokens: usize,
    min_length: usize,
}

impl NameValidator {
    pub fn new() -> Self {
        Self {
            min_tokens: 2,
            min_length: 4,
        }
    }

    /// Set the minimum token count.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Set the minimum character length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Parse and check a raw candidate.
    pub fn validate(&self, candidate: &str) -> Result<ValidatedName, Rejection> {
        let parsed = HumanName::parse(candidate);
        if parsed.first.is_empty() || parsed.last.is_empty() {
            return Err(Rejection::Unparseable);
        }

        let full = format!("{} {}", parsed.first, parsed.last);
        self.check(&full)?;

        Ok(ValidatedName {
            first: parsed.first,
            last: parsed.last,
            full,
        })
    }

    /// Apply the acceptance rules to an already reconstructed name.
    pub fn check(&self, name: &str) -> Result<(), Rejection> {
        let tokens: Vec<&str> = name.split_whitespace().collect();

        if tokens.len() < self.min_tokens || name.chars().count() < self.min_length {
            return Err(Rejection::TooShort);
        }

        if tokens
            .iter()
            .any(|t| BLOCKED_WORDS.contains(&t.to_lowercase().as_str()))
        {
            return Err(Rejection::BlockedWord);
        }

        if name.chars().any(|c| c.is_ascii_digit()) {
            return Err(Rejection::Digit);
        }

        if !tokens.iter().all(|t| starts_uppercase(t)) {
            return Err(Rejection::Lowercase);
        }

        if name.chars().any(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(Rejection::Punctuation);
        }

        for token in &tokens {
            for separator in ['-', '\''] {
                if token.contains(separator)
                    && !token.split(separator).all(|part| starts_uppercase(part))
                {
                    return Err(Rejection::CompoundPart);
                }
            }
        }

        Ok(())
    }

    /// Validate candidates in discovery order and keep the one with the most
    /// tokens; the earliest wins a tie.
    pub fn select<'a, I>(&self, candidates: I) -> Option<ValidatedName>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<ValidatedName> = None;

        for candidate in candidates {
            match self.validate(candidate) {
                Ok(name) => {
                    let better = best
                        .as_ref()
                        .is_none_or(|b| name.token_count() > b.token_count());
                    if better {
                        best = Some(name);
                    }
                }
                Err(reason) => trace!("Rejected {:?}: {:?}", candidate, reason),
            }
        }

        best
    }
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn accepts(name: &str) -> bool {
        NameValidator::new().validate(name).is_ok()
    }

    #[test]
    fn test_accepts_plain_names() {
        let name = NameValidator::new().validate("John Smith").unwrap();
        assert_eq!(name.first, "John");
        assert_eq!(name.last, "Smith");
        assert_eq!(name.full, "John Smith");
        assert!(accepts("RAJ K"));
    }

    #[test]
    fn test_rejects_single_token() {
        assert_eq!(
            NameValidator::new().validate("Madonna"),
            Err(Rejection::Unparseable)
        );
        assert_eq!(NameValidator::new().check("Madonna"), Err(Rejection::TooShort));
        assert_eq!(NameValidator::new().check("A B"), Err(Rejection::TooShort));
    }

    #[test]
    fn test_rejects_blocked_words_any_case() {
        for name in ["Resume Smith", "John EDUCATION", "Father Brown", "Page Two", "Current Status"] {
            assert_eq!(NameValidator::new().validate(name), Err(Rejection::BlockedWord), "{name}");
        }
    }

    #[test]
    fn test_rejects_digits_and_punctuation() {
        assert_eq!(NameValidator::new().check("John Sm1th"), Err(Rejection::Digit));
        // only 0-9 count as digits
        assert_ne!(NameValidator::new().check("John Sm½th"), Err(Rejection::Digit));
        assert_eq!(NameValidator::new().check("John Smith!"), Err(Rejection::Punctuation));
        assert_eq!(NameValidator::new().check("John Sm_ith"), Err(Rejection::Punctuation));
        assert_eq!(NameValidator::new().check("John (Smith)"), Err(Rejection::Lowercase));
    }

    #[test]
    fn test_rejects_lowercase_token() {
        assert_eq!(NameValidator::new().validate("john Smith"), Err(Rejection::Lowercase));
        // particles end up in the surname and fail capitalization
        assert!(!accepts("Ludwig van Beethoven"));
    }

    #[test]
    fn test_hyphen_and_apostrophe_parts() {
        assert!(accepts("Mary-Jane O'Brien"));
        assert!(!accepts("mary-jane O'brien"));
        assert_eq!(NameValidator::new().check("Mary-jane Smith"), Err(Rejection::CompoundPart));
        assert_eq!(NameValidator::new().check("John O'brien"), Err(Rejection::CompoundPart));
        assert_eq!(NameValidator::new().check("Mary- Smith"), Err(Rejection::CompoundPart));
    }

    #[test]
    fn test_middle_names_dropped() {
        let name = NameValidator::new().validate("Dr. John A. Smith").unwrap();
        assert_eq!(name.full, "John Smith");
    }

    #[test]
    fn test_select_most_tokens_first_on_tie() {
        let validator = NameValidator::new();
        let selected = validator
            .select(["Software Engineer", "John Smith", "resume"])
            .unwrap();
        assert_eq!(selected.full, "Software Engineer");

        let selected = validator.select(["Mary Jane", "Ana de la Cruz"]).unwrap();
        assert_eq!(selected.full, "Mary Jane");

        assert_eq!(validator.select(["cv", "12 34"]), None);
    }
}
