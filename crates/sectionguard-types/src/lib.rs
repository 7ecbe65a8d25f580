//! Stable DTOs and IDs used across the sectionguard workspace.
//!
//! Everything here is plain data:
//! - the persisted reference document produced by extraction
//! - validation, fix, and balance report envelopes
//! - stable check IDs, issue codes, and fix rule IDs
//! - repo-relative path handling and the explain registry

#![forbid(unsafe_code)]

pub mod balance;
pub mod explain;
pub mod ids;
pub mod path;
pub mod reference;
pub mod report;

pub use balance::{BalanceEntry, BalanceReport, SCHEMA_BALANCE_V1};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use reference::{
    EntityRecord, ExtractionMeta, ExtractionWarning, ModifierTable, ReferenceDocument,
    SCHEMA_REFERENCE_V1, SlotContext, TechnologyTable,
};
pub use report::{
    FixChange, FixData, FixReport, IssueCategory, Location, SCHEMA_FIX_V1, SCHEMA_VALIDATION_V1,
    Severity, ToolMeta, ValidationData, ValidationIssue, ValidationReport, Verdict,
};
