//! Cross-page reconciliation of partial records.

use std::collections::HashSet;

use tracing::debug;

use crate::models::config::EmitPolicy;
use crate::models::contact::{ContactRecord, PartialRecord};

/// Folds a document's per-page records, in page order, into contact records.
///
/// The accumulator keeps its name after each emission, so a name found once
/// anchors every later contact field in the document until a new, unseen
/// name replaces it.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    policy: EmitPolicy,
    current: ContactRecord,
    seen_names: HashSet<String>,
    emitted: Vec<ContactRecord>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: EmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fold one page's evidence into the accumulator.
    ///
    /// Returns the records emitted by this step.
    pub fn apply(&mut self, partial: &PartialRecord) -> &[ContactRecord] {
        let before = self.emitted.len();

        if let Some(name) = partial.name_text() {
            if !self.seen_names.contains(name) {
                if self.policy == EmitPolicy::AllFields && self.current.is_complete() {
                    self.emit(partial.page);
                    self.current = ContactRecord::default();
                }
                self.seen_names.insert(name.to_string());
                self.current.name = name.to_string();
                self.current.name_page = Some(partial.page);
            }
        }

        if let Some(email) = &partial.email {
            if self.current.email.is_empty() {
                self.current.email = email.clone();
                self.current.email_page = Some(partial.page);
            }
        }

        if let Some(phone) = &partial.phone {
            if self.current.phone.is_empty() {
                self.current.phone = phone.clone();
                self.current.phone_page = Some(partial.page);
            }
        }

        let ready = match self.policy {
            EmitPolicy::FirstContact => self.current.is_complete(),
            EmitPolicy::AllFields => {
                !self.current.name.is_empty()
                    && !self.current.email.is_empty()
                    && !self.current.phone.is_empty()
            }
        };
        if ready {
            self.emit(partial.page);
        }

        &self.emitted[before..]
    }

    /// Push a copy of the accumulator and clear its contact fields.
    fn emit(&mut self, page: u32) {
        let record = self.current.clone();
        debug!(
            "Emitting {:?} at page {} (email={:?}, phone={:?})",
            record.name, page, record.email, record.phone
        );

        self.current = ContactRecord {
            name: record.name.clone(),
            name_page: record.name_page,
            ..Default::default()
        };
        self.emitted.push(record);
    }

    /// The accumulator as it stands.
    pub fn current(&self) -> &ContactRecord {
        &self.current
    }

    /// Records emitted so far.
    pub fn emitted(&self) -> &[ContactRecord] {
        &self.emitted
    }

    /// Close the document and return every emitted record, in order.
    pub fn finish(mut self) -> Vec<ContactRecord> {
        if self.current.is_complete() {
            let record = std::mem::take(&mut self.current);
            self.emitted.push(record);
        }
        self.emitted
    }

    /// Reconcile a whole document's records in one pass.
    pub fn reconcile<'a, I>(mut self, records: I) -> Vec<ContactRecord>
    where
        I: IntoIterator<Item = &'a PartialRecord>,
    {
        for record in records {
            self.apply(record);
        }
        self.finish()
    }
}
