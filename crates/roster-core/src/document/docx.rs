//! Word documents: paragraphs grouped into pseudo-pages.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::ReadError;
use crate::models::contact::PageText;

use super::DocumentReader;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads `word/document.xml` from a `.docx` container.
///
/// Word files carry no page layout, so every `paragraphs_per_page`
/// non-blank paragraphs form one page.
#[derive(Debug, Clone)]
pub struct DocxReader {
    paragraphs_per_page: usize,
}

impl DocxReader {
    pub fn new() -> Self {
        Self {
            paragraphs_per_page: 5,
        }
    }

    pub fn with_paragraphs_per_page(mut self, paragraphs_per_page: usize) -> Self {
        self.paragraphs_per_page = paragraphs_per_page.max(1);
        self
    }

    fn document_xml(data: &[u8]) -> Result<String, ReadError> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| ReadError::Word(e.to_string()))?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ReadError::Word(format!("{}: {}", DOCUMENT_PART, e)))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| ReadError::Word(e.to_string()))?;
        Ok(xml)
    }

    /// Text of every `<w:p>`, tabs and breaks included.
    ///
    /// Paragraphs nest inside text boxes (`w:txbxContent`); each open
    /// paragraph keeps its own buffer, so an inner one is emitted when it
    /// closes and the outer one continues where it left off.
    fn paragraphs(xml: &str) -> Result<Vec<String>, ReadError> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut open: Vec<String> = Vec::new();
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"p" => open.push(String::new()),
                    b"t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tab" => push_text(&mut open, "\t"),
                    b"br" | b"cr" => push_text(&mut open, "\n"),
                    b"p" => paragraphs.push(String::new()),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text => {
                    let text = e.unescape().map_err(|e| ReadError::Word(e.to_string()))?;
                    push_text(&mut open, &text);
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" => paragraphs.extend(open.pop()),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(ReadError::Word(e.to_string())),
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

/// Append to the innermost open paragraph; text outside one is dropped.
fn push_text(open: &mut [String], text: &str) {
    if let Some(current) = open.last_mut() {
        current.push_str(text);
    }
}

impl Default for DocxReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for DocxReader {
    fn read(&self, data: &[u8]) -> Result<Vec<PageText>, ReadError> {
        let xml = Self::document_xml(data)?;
        let paragraphs = Self::paragraphs(&xml)?;
        let total = paragraphs.len();

        let filled: Vec<String> = paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        debug!("Word document has {} paragraphs ({} with text)", total, filled.len());

        Ok(PageText::numbered(
            filled
                .chunks(self.paragraphs_per_page)
                .map(|chunk| chunk.join("\n")),
        ))
    }
}
