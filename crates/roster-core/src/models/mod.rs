//! Data models and configuration.

pub mod config;
pub mod contact;

pub use config::{EmitPolicy, LoneFields, OutputKind, RosterConfig};
pub use contact::{ContactRecord, PageText, PartialRecord, Roster, ValidatedName, ROSTER_COLUMNS};
