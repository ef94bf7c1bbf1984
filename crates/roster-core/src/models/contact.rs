//! Identity data models: page text in, contact records and rosters out.

use serde::{Deserialize, Serialize};

/// Column headers of a written roster, in output order.
pub const ROSTER_COLUMNS: [&str; 6] = [
    "Name",
    "Name_Found_On_Page",
    "Email",
    "Email_Found_On_Page",
    "Phone",
    "Phone_Found_On_Page",
];

/// Plain text of one document page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed).
    pub page: u32,

    /// Extracted text; empty when the page could not be read.
    pub text: String,
}

impl PageText {
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }

    /// Number a sequence of page texts from 1.
    pub fn numbered<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Self::new(idx as u32 + 1, text))
            .collect()
    }
}

/// A person name that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedName {
    /// Given name component.
    pub first: String,

    /// Family name component (may carry particles, e.g. "van Dyke").
    pub last: String,

    /// Reconstructed `"<first> <last>"`.
    pub full: String,
}

impl ValidatedName {
    /// Number of whitespace-separated tokens in the full name.
    pub fn token_count(&self) -> usize {
        self.full.split_whitespace().count()
    }
}

/// Evidence found on a single page before reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRecord {
    /// Page the evidence came from.
    pub page: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ValidatedName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PartialRecord {
    /// Name text, if a name was found on the page.
    pub fn name_text(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.full.as_str())
    }
}

/// A reconciled identity with the page each field was first seen on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_page: Option<u32>,
}

impl ContactRecord {
    /// True when name, email and phone are all empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }

    /// True when the record has a name and at least one contact field.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && (!self.email.is_empty() || !self.phone.is_empty())
    }

    /// The `(email, phone)` pair used for deduplication, unless both are empty.
    pub fn contact_key(&self) -> Option<(&str, &str)> {
        if self.email.is_empty() && self.phone.is_empty() {
            None
        } else {
            Some((self.email.as_str(), self.phone.as_str()))
        }
    }

    /// Cell values in [`ROSTER_COLUMNS`] order; absent pages are empty.
    pub fn row(&self) -> [String; 6] {
        let page = |p: Option<u32>| p.map(|n| n.to_string()).unwrap_or_default();
        [
            self.name.clone(),
            page(self.name_page),
            self.email.clone(),
            page(self.email_page),
            self.phone.clone(),
            page(self.phone_page),
        ]
    }
}

/// Final deduplicated, name-sorted list of contact records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    records: Vec<ContactRecord>,
}

impl Roster {
    /// Wrap records that are already deduplicated and sorted.
    pub(crate) fn from_sorted(records: Vec<ContactRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ContactRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
