//! Email and phone extraction.

use regex::Regex;

use super::patterns::{EMAIL, PHONE};
use super::{ExtractionMatch, FieldExtractor};

fn matches_of(pattern: &Regex, text: &str) -> Vec<ExtractionMatch<String>> {
    pattern
        .find_iter(text)
        .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.start(), m.end()))
        .collect()
}

/// Email address extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        EMAIL
            .find(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.start(), m.end()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        matches_of(&EMAIL, text)
    }
}

/// Phone number extractor.
///
/// Accepts an optional one or two digit country code, a parenthesized area
/// code and `.`, `-` or space separators. No checksum or range validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PHONE
            .find(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.start(), m.end()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        matches_of(&PHONE, text)
    }
}

/// The first email and phone found on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Extracts the contact fields of a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFieldExtractor {
    email: EmailExtractor,
    phone: PhoneExtractor,
}

impl ContactFieldExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// First email-shaped and first phone-shaped substrings of the text.
    pub fn extract(&self, text: &str) -> ContactFields {
        ContactFields {
            email: self.email.extract(text).map(|m| m.value),
            phone: self.phone.extract(text).map(|m| m.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_of_each() {
        let text = "Email: jane@example.com / jdoe@work.io\nPhone: (555) 123-4567, 555.987.6543";
        let fields = ContactFieldExtractor::new().extract(text);
        assert_eq!(
            fields,
            ContactFields {
                email: Some("jane@example.com".to_string()),
                phone: Some("(555) 123-4567".to_string()),
            }
        );
    }

    #[test]
    fn test_absent_fields() {
        let fields = ContactFieldExtractor::new().extract("Objective\nBuild things");
        assert_eq!(fields, ContactFields::default());
        assert_eq!(ContactFieldExtractor::new().extract(""), ContactFields::default());
    }

    #[test]
    fn test_extract_all_positions() {
        let text = "a@b.co then c@d.org";
        let all = EmailExtractor.extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].position, (0, 6));
        assert_eq!(all[1].value, "c@d.org");
    }

    #[test]
    fn test_email_and_phone_on_one_line() {
        let fields = ContactFieldExtractor::new().extract("alice@x.com, 555-000-1111");
        assert_eq!(fields.email.as_deref(), Some("alice@x.com"));
        assert_eq!(fields.phone.as_deref(), Some("555-000-1111"));
    }
}
