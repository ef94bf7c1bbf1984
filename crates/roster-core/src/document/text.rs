//! Plain text documents, paged by form feeds.

use crate::error::ReadError;
use crate::models::contact::PageText;

use super::DocumentReader;

const FORM_FEED: char = '\x0c';

/// Reads UTF-8 text; each form feed starts a new page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl PlainTextReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PlainTextReader {
    fn read(&self, data: &[u8]) -> Result<Vec<PageText>, ReadError> {
        let content = String::from_utf8_lossy(data);
        let content = content.strip_suffix(FORM_FEED).unwrap_or(content.as_ref());
        Ok(PageText::numbered(content.split(FORM_FEED)))
    }
}
