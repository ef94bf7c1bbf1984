//! Core library for extracting contact rosters from resumes.
//!
//! This crate provides:
//! - Document readers (PDF, Word, plain text) producing numbered page texts
//! - Name candidate generation from pattern rules and entity recognizers
//! - Name validation and per-page contact field extraction
//! - Cross-page reconciliation and roster deduplication

pub mod document;
pub mod error;
pub mod identity;
pub mod models;

pub use document::{read_document, DocumentFormat, DocumentReader};
pub use error::{ReadError, RecognizerError, Result, RosterError};
pub use identity::{
    build_roster, dedup_roster, recognizers_from_config, DocumentResult, EntityRecognizer,
    Reconciler, RosterExtractor,
};
pub use models::{
    ContactRecord, EmitPolicy, LoneFields, OutputKind, PageText, PartialRecord, Roster, RosterConfig,
    ValidatedName, ROSTER_COLUMNS,
};

/// Re-export inference types.
pub use roster_inference::{InferenceBackend, InputTensor, OutputTensor};

#[cfg(feature = "native")]
pub use roster_inference::OrtBackend;
