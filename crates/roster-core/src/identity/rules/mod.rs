//! Rule-based extractors for resume identity fields.

pub mod contact;
pub mod names;
pub mod patterns;

pub use contact::{ContactFieldExtractor, ContactFields, EmailExtractor, PhoneExtractor};
pub use names::{PatternMatcher, PatternRule};
pub use patterns::is_header_line;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched field value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: (usize, usize),
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self {
            value,
            position: (start, end),
        }
    }
}
