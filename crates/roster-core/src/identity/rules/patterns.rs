//! Common regex patterns for resume identity extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled name fields ("Name: John Smith", "Full name - Jane Doe")
    pub static ref LABELED_NAME: Regex = Regex::new(
        r"(?i)(?:name|candidate name|full name)\s*[:|-]\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)"
    ).unwrap();

    pub static ref LABELED_APPLICANT: Regex = Regex::new(
        r"(?i)(?:applicant name|candidate|profile)\s*[:|-]\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)"
    ).unwrap();

    // Honorific prefixes
    pub static ref HONORIFIC_NAME: Regex = Regex::new(
        r"\b(?:Mr\.|Mrs\.|Ms\.|Dr\.|Prof\.|Er\.|Shri\.|Smt\.)\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)"
    ).unwrap();

    // A line that is nothing but 2-4 capitalized words
    pub static ref TITLE_CASE_LINE: Regex = Regex::new(
        r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})$"
    ).unwrap();

    // Upper-case name followed by initials ("RAJ K", "RAJ KUMAR S")
    pub static ref TRAILING_INITIAL: Regex = Regex::new(
        r"(^[A-Z]+ [A-Z]$)"
    ).unwrap();

    pub static ref DOUBLE_TRAILING_INITIAL: Regex = Regex::new(
        r"(^[A-Z]+ [A-Z]+ [A-Z]$)"
    ).unwrap();

    // "John A. Smith"
    pub static ref MIDDLE_INITIAL: Regex = Regex::new(
        r"([A-Z][a-z]+\s+[A-Z]\.\s+[A-Z][a-z]+)"
    ).unwrap();

    // Nobiliary particles ("Vincent van Gogh", "Maria de la Cruz")
    pub static ref PARTICLE_NAME: Regex = Regex::new(
        r"([A-Z][a-z]+(?:\s+(?:van|de|der|den|das|dos|do|da|los|la|le|von)\s+[A-Z][a-z]+)+)"
    ).unwrap();

    // Relational prefixes ("S/O Ramesh Kumar")
    pub static ref RELATIONAL_NAME: Regex = Regex::new(
        r"(?i)(?:s/o|d/o|w/o).*?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)"
    ).unwrap();

    // Names with an apostrophe'd word anywhere ("Ma'Kayla Jones", "John O'Brien")
    pub static ref APOSTROPHE_NAME: Regex = Regex::new(&joined_name('\'')).unwrap();

    // Names with a hyphenated word anywhere ("Jean-Luc Picard", "Mary Smith-Jones")
    pub static ref HYPHENATED_NAME: Regex = Regex::new(&joined_name('-')).unwrap();

    // Email pattern
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Phone pattern (optional country code, parenthesized area code, . - or space separators)
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+\d{1,2}\s?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}"
    ).unwrap();
}

/// A capitalized word, possibly joined to others by `-` or `'`
/// ("Smith", "Smith-Jones", "O'Brien").
const NAME_WORD: &str = r"(?:[A-Z][a-z]*(?:['-][A-Z][a-z]+)+|[A-Z][a-z]+)";

/// Pattern for a run of [`NAME_WORD`]s in which at least one word contains
/// `separator`. The run must not start or end inside a joined word.
fn joined_name(separator: char) -> String {
    let joined = format!(
        r"[A-Z][a-z]*(?:['-][A-Z][a-z]+)*{sep}[A-Z][a-z]+(?:['-][A-Z][a-z]+)*",
        sep = separator
    );
    format!(
        r"(?:^|[^\w'-])((?:{word}\s+)*{joined}(?:\s+{word})*)(?:[^\w'-]|$)",
        word = NAME_WORD,
        joined = joined
    )
}

/// Lower-case keywords marking a document header line ("Resume", "Curriculum Vitae").
pub const HEADER_KEYWORDS: [&str; 4] = ["resume", "cv", "curriculum vitae", "biodata"];

/// True when a line contains a resume/CV/biodata header keyword.
pub fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_line() {
        assert!(is_header_line("RESUME"));
        assert!(is_header_line("Curriculum Vitae of the applicant"));
        assert!(is_header_line("My Biodata"));
        // substring match, as for any keyword
        assert!(is_header_line("CVS Pharmacy"));
        assert!(!is_header_line("John Smith"));
    }

    #[test]
    fn test_email_pattern() {
        let m = EMAIL.find("reach me at jane.doe+jobs@mail.example.org today").unwrap();
        assert_eq!(m.as_str(), "jane.doe+jobs@mail.example.org");
        assert!(EMAIL.find("jane at example dot com").is_none());
    }

    #[test]
    fn test_phone_pattern() {
        for phone in ["555-123-4567", "(555) 123-4567", "+1 555.123.4567", "5551234567"] {
            let m = PHONE.find(phone).unwrap();
            assert_eq!(m.as_str(), phone);
        }
        assert!(PHONE.find("12-34").is_none());
    }
}
