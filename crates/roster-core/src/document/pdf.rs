//! PDF page text using lopdf, with pdf-extract as a whole-document fallback.

use lopdf::Document;
use tracing::{debug, trace};

use crate::error::ReadError;
use crate::models::contact::PageText;

use super::DocumentReader;

/// Reads the text layer of a PDF page by page.
///
/// Scanned pages without a text layer come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse the document, decrypting it when it uses an empty user password.
    ///
    /// Returns the document and the bytes pdf-extract should read.
    fn load(data: &[u8]) -> Result<(Document, Vec<u8>), ReadError> {
        let mut doc = Document::load_mem(data).map_err(|e| ReadError::Pdf(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(ReadError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| ReadError::Pdf(format!("Failed to save decrypted PDF: {}", e)))?;
            return Ok((doc, decrypted));
        }

        Ok((doc, data.to_vec()))
    }

    /// Whole-document extraction split on form feeds.
    fn fallback_pages(raw: &[u8]) -> Option<Vec<PageText>> {
        let text = match pdf_extract::extract_text_from_mem(raw) {
            Ok(text) => text,
            Err(e) => {
                debug!("pdf-extract failed: {}", e);
                return None;
            }
        };
        if text.trim().is_empty() {
            return None;
        }

        let text = text.trim_end_matches('\x0c');
        Some(PageText::numbered(text.split('\x0c')))
    }
}

impl DocumentReader for PdfReader {
    fn read(&self, data: &[u8]) -> Result<Vec<PageText>, ReadError> {
        let (doc, raw) = Self::load(data)?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ReadError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_numbers.len());

        let pages: Vec<PageText> = page_numbers
            .iter()
            .map(|&number| {
                let text = doc.extract_text(&[number]).unwrap_or_else(|e| {
                    trace!("No text on page {}: {}", number, e);
                    String::new()
                });
                PageText::new(number, text)
            })
            .collect();

        if pages.iter().all(|p| p.text.trim().is_empty()) {
            if let Some(fallback) = Self::fallback_pages(&raw) {
                debug!("Using pdf-extract text ({} pages)", fallback.len());
                return Ok(fallback);
            }
        }

        Ok(pages)
    }
}
