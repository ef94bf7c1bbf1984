//! Error types for the roster-core library.

use thiserror::Error;

/// Main error type for the roster library.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Document reading error.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to turning a document into page text.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The file type is not one the readers understand.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Failed to open the Word container or its document part.
    #[error("failed to read Word document: {0}")]
    Word(String),

    /// The document has no pages.
    #[error("document has no pages")]
    NoPages,
}

/// Errors raised by an entity recognizer backend.
///
/// These never abort a page: the candidate layer logs them and treats the
/// backend as having proposed nothing for the line.
#[derive(Error, Debug)]
pub enum RecognizerError {
    /// Model or tokenizer could not be loaded.
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Tokenizing the line failed.
    #[error("tokenization failed: {0}")]
    Tokenize(String),

    /// Running the model failed or produced unusable output.
    #[error("inference failed: {0}")]
    Inference(#[from] roster_inference::InferenceError),

    /// Model output did not line up with the tokenized input.
    #[error("unexpected model output: {0}")]
    Output(String),
}

/// Result type for the roster library.
pub type Result<T> = std::result::Result<T, RosterError>;
