//! Per-page evidence aggregation.

use tracing::debug;

use crate::models::config::LoneFields;
use crate::models::contact::{PageText, PartialRecord};

use super::candidates::CandidateGenerator;
use super::rules::ContactFieldExtractor;
use super::validator::NameValidator;

/// Turns one page into zero or one [`PartialRecord`].
#[derive(Debug, Clone)]
pub struct PageAggregator {
    candidates: CandidateGenerator,
    validator: NameValidator,
    fields: ContactFieldExtractor,
    lone_fields: LoneFields,
}

impl PageAggregator {
    pub fn new(candidates: CandidateGenerator, validator: NameValidator) -> Self {
        Self {
            candidates,
            validator,
            fields: ContactFieldExtractor::new(),
            lone_fields: LoneFields::Drop,
        }
    }

    /// Set what happens to a page with an email or a phone but not both,
    /// and no name.
    pub fn with_lone_fields(mut self, lone_fields: LoneFields) -> Self {
        self.lone_fields = lone_fields;
        self
    }

    /// Analyze a page.
    ///
    /// Emits a record when a name was found, or when both an email and a
    /// phone were found. With [`LoneFields::Keep`] any single field is enough.
    pub fn analyze_page(&self, page: &PageText) -> Option<PartialRecord> {
        if page.text.trim().is_empty() {
            return None;
        }

        let candidates = self.candidates.generate(&page.text);
        let name = self.validator.select(candidates.texts());
        let fields = self.fields.extract(&page.text);

        debug!(
            "Page {}: {} candidates, name={:?}, email={:?}, phone={:?}",
            page.page,
            candidates.len(),
            name.as_ref().map(|n| n.full.as_str()),
            fields.email,
            fields.phone
        );

        let emit = match self.lone_fields {
            LoneFields::Drop => {
                name.is_some() || (fields.email.is_some() && fields.phone.is_some())
            }
            LoneFields::Keep => {
                name.is_some() || fields.email.is_some() || fields.phone.is_some()
            }
        };

        if !emit {
            return None;
        }

        Some(PartialRecord {
            page: page.page,
            name,
            email: fields.email,
            phone: fields.phone,
        })
    }
}
