//! Resume identity extraction: candidate names, validation, per-page
//! aggregation and cross-page reconciliation.

pub mod aggregator;
pub mod candidates;
pub mod dedup;
pub mod human_name;
pub mod ner;
pub mod pipeline;
pub mod reconciler;
pub mod rules;
pub mod validator;

pub use aggregator::PageAggregator;
pub use candidates::{CandidateGenerator, CandidateSet, CandidateSource, NameCandidate, Technique};
pub use dedup::dedup_roster;
pub use human_name::HumanName;
pub use ner::{recognizers_from_config, CapitalizedRunRecognizer, EntityRecognizer, TokenClassifier};
pub use pipeline::{build_roster, DocumentResult, RosterExtractor};
pub use reconciler::Reconciler;
pub use rules::{ContactFieldExtractor, ContactFields, PatternMatcher, PatternRule};
pub use validator::{NameValidator, Rejection};
