//! Document readers turning files into numbered page texts.

mod docx;
mod pdf;
mod text;

pub use docx::DocxReader;
pub use pdf::PdfReader;
pub use text::PlainTextReader;

use std::path::Path;

use tracing::debug;

use crate::error::ReadError;
use crate::models::config::ReaderConfig;
use crate::models::contact::PageText;
use crate::Result;

/// Input formats the readers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Word,
    PlainText,
}

impl DocumentFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> std::result::Result<Self, ReadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" | "doc" => Ok(DocumentFormat::Word),
            "txt" => Ok(DocumentFormat::PlainText),
            _ => Err(ReadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Trait for document reading implementations.
pub trait DocumentReader {
    /// Split a document into page texts numbered from 1.
    ///
    /// A page whose text cannot be recovered is kept with empty text.
    fn read(&self, data: &[u8]) -> std::result::Result<Vec<PageText>, ReadError>;
}

/// Read a file into page texts with the reader matching its extension.
pub fn read_document(path: &Path, config: &ReaderConfig) -> Result<Vec<PageText>> {
    let format = DocumentFormat::from_path(path)?;
    let data = std::fs::read(path)?;
    debug!("Reading {} as {:?} ({} bytes)", path.display(), format, data.len());

    let pages = match format {
        DocumentFormat::Pdf => PdfReader::new().read(&data)?,
        DocumentFormat::Word => DocxReader::new()
            .with_paragraphs_per_page(config.paragraphs_per_page)
            .read(&data)?,
        DocumentFormat::PlainText => PlainTextReader::new().read(&data)?,
    };

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/cv.PDF")).unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_path(Path::new("cv.docx")).unwrap(), DocumentFormat::Word);
        assert_eq!(DocumentFormat::from_path(Path::new("cv.doc")).unwrap(), DocumentFormat::Word);
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.txt")).unwrap(),
            DocumentFormat::PlainText
        );
        assert!(matches!(
            DocumentFormat::from_path(Path::new("photo.png")),
            Err(ReadError::UnsupportedFormat(_))
        ));
        assert!(DocumentFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_unsupported_fails_before_reading() {
        let err = read_document(Path::new("/nonexistent/photo.png"), &ReaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, RosterError::Read(ReadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, "Jane Doe\x0cjane@x.com").unwrap();

        let pages = read_document(&path, &ReaderConfig::default()).unwrap();
        assert_eq!(pages, PageText::numbered(["Jane Doe", "jane@x.com"]));
    }
}
