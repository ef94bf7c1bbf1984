//! Document-level extraction: pages in, contact records out.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::read_document;
use crate::models::config::{EmitPolicy, ReaderConfig, RosterConfig};
use crate::models::contact::{ContactRecord, PageText, PartialRecord, Roster};
use crate::Result;

use super::aggregator::PageAggregator;
use super::candidates::{CandidateGenerator, CandidateSource};
use super::dedup::dedup_roster;
use super::ner::EntityRecognizer;
use super::reconciler::Reconciler;
use super::rules::PatternMatcher;
use super::validator::NameValidator;

/// Result of extracting one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// Records emitted by the reconciler, in page order.
    pub records: Vec<ContactRecord>,
    /// Per-page evidence that fed the reconciler.
    pub partials: Vec<PartialRecord>,
    /// Number of pages read.
    pub pages: usize,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Runs the per-page analysis and the cross-page reconciliation.
#[derive(Debug, Clone)]
pub struct RosterExtractor {
    aggregator: PageAggregator,
    reader: ReaderConfig,
    emit: EmitPolicy,
    parallel: bool,
}

impl RosterExtractor {
    pub fn new(aggregator: PageAggregator) -> Self {
        Self {
            aggregator,
            reader: ReaderConfig::default(),
            emit: EmitPolicy::FirstContact,
            parallel: true,
        }
    }

    /// Build an extractor from configuration and already loaded recognizers.
    pub fn from_config(config: &RosterConfig, recognizers: Vec<Arc<dyn EntityRecognizer>>) -> Self {
        let extraction = &config.extraction;

        let mut sources = vec![CandidateSource::Patterns(
            PatternMatcher::new().with_min_tokens(extraction.min_name_tokens),
        )];
        sources.extend(recognizers.into_iter().map(CandidateSource::Entities));

        let candidates =
            CandidateGenerator::new(sources).with_header_lines(extraction.header_lines);
        let validator = NameValidator::new()
            .with_min_tokens(extraction.min_name_tokens)
            .with_min_length(extraction.min_name_length);
        let aggregator =
            PageAggregator::new(candidates, validator).with_lone_fields(extraction.lone_fields);

        Self {
            aggregator,
            reader: config.reader.clone(),
            emit: extraction.emit,
            parallel: extraction.parallel_pages,
        }
    }

    /// Analyze pages across threads.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set when the reconciler emits records.
    pub fn with_emit_policy(mut self, emit: EmitPolicy) -> Self {
        self.emit = emit;
        self
    }

    /// Set the document reader options used by [`Self::extract_file`].
    pub fn with_reader(mut self, reader: ReaderConfig) -> Self {
        self.reader = reader;
        self
    }

    /// Per-page records in page order.
    pub fn analyze_pages(&self, pages: &[PageText]) -> Vec<PartialRecord> {
        if self.parallel {
            pages
                .par_iter()
                .filter_map(|page| self.aggregator.analyze_page(page))
                .collect()
        } else {
            pages
                .iter()
                .filter_map(|page| self.aggregator.analyze_page(page))
                .collect()
        }
    }

    /// Extract the contact records of one document.
    pub fn extract_document(&self, pages: &[PageText]) -> DocumentResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let partials = self.analyze_pages(pages);
        let records = Reconciler::new().with_policy(self.emit).reconcile(&partials);

        if partials.iter().all(|p| p.name.is_none()) {
            warnings.push("No person name found".to_string());
        }
        let blank = pages.iter().filter(|p| p.text.trim().is_empty()).count();
        if blank > 0 {
            warnings.push(format!("{} of {} pages had no text", blank, pages.len()));
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} records from {} pages ({} with evidence) in {}ms",
            records.len(),
            pages.len(),
            partials.len(),
            processing_time_ms
        );

        DocumentResult {
            records,
            partials,
            pages: pages.len(),
            warnings,
            processing_time_ms,
        }
    }

    /// Read a document from disk and extract its contact records.
    pub fn extract_file(&self, path: &Path) -> Result<DocumentResult> {
        debug!("Reading {}", path.display());
        let pages = read_document(path, &self.reader)?;
        Ok(self.extract_document(&pages))
    }
}

/// Merge documents' records into the final roster.
pub fn build_roster<'a, I>(documents: I) -> Roster
where
    I: IntoIterator<Item = &'a DocumentResult>,
{
    dedup_roster(
        documents
            .into_iter()
            .flat_map(|doc| doc.records.iter().cloned()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::LoneFields;
    use pretty_assertions::assert_eq;

    fn extractor(lone_fields: LoneFields) -> RosterExtractor {
        let mut config = RosterConfig::default();
        config.extraction.lone_fields = lone_fields;
        RosterExtractor::from_config(&config, Vec::new())
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages = PageText::numbered([
            "Ann Lee\nann@x.com 555-000-1111",
            "",
            "Bob Ray\nbob@x.com",
            "carol@x.com 555-222-3333",
        ]);
        let parallel = extractor(LoneFields::Drop).analyze_pages(&pages);
        let sequential = extractor(LoneFields::Drop)
            .with_parallel(false)
            .analyze_pages(&pages);
        assert_eq!(parallel, sequential);
        let page_numbers: Vec<u32> = parallel.iter().map(|p| p.page).collect();
        assert_eq!(page_numbers, vec![1, 3, 4]);
    }

    #[test]
    fn test_document_warnings() {
        let pages = PageText::numbered(["", "nothing to see here"]);
        let result = extractor(LoneFields::Drop).extract_document(&pages);
        assert!(result.records.is_empty());
        assert_eq!(result.pages, 2);
        assert_eq!(
            result.warnings,
            vec!["No person name found".to_string(), "1 of 2 pages had no text".to_string()]
        );
    }

    #[test]
    fn test_build_roster_across_documents() {
        let ex = extractor(LoneFields::Drop);
        let first = ex.extract_document(&PageText::numbered(["Zoe Park\nzoe@x.com 555-000-1111"]));
        let second = ex.extract_document(&PageText::numbered([
            "Ann Lee\nzoe@x.com 555-000-1111",
            "Ann Lee\nann@x.com",
        ]));
        let roster = build_roster([&first, &second]);
        let names: Vec<&str> = roster.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ann Lee", "Zoe Park"]);
        assert_eq!(roster.records()[0].email, "ann@x.com");
    }
}
