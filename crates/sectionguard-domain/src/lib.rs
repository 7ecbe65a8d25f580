//! Pure reference validation (no IO).
//!
//! Input: a reference document and section templates parsed elsewhere.
//! Output: ordered issues + verdict, fixer changes and text edits, balance scores.

#![forbid(unsafe_code)]

pub mod balance;
pub mod checks;
pub mod curated;
pub mod extract;
pub mod fixer;
pub mod model;
pub mod policy;
pub mod report;
pub mod slots;

mod engine;
mod fingerprint;

pub use engine::validate;
pub use extract::ReferenceBuilder;
pub use fixer::{FixOutcome, fix};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
