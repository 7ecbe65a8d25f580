//! Use case orchestration for sectionguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! settings, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod balance;
mod config;
mod explain;
mod extract;
mod fix;
mod info;
mod render;
mod report;
mod validate;

pub use balance::{AnalyzeInput, CalcInput, format_score, run_analyze, run_calc};
pub use config::resolve_config_text;
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use extract::{ExtractInput, ExtractOutput, format_extract_summary, run_extract};
pub use fix::{FixInput, FixOutput, run_fix};
pub use info::{EntityInfo, InfoInput, ShipInfo, SlotInfo, format_info, run_info, ship_info};
pub use render::{
    render_annotations, render_balance, render_fix_markdown, render_fix_text, render_markdown,
    render_text,
};
pub use report::{
    parse_fix_report, parse_validation_report, runtime_error_fix_report, runtime_error_report,
    serialize_report, to_renderable, to_renderable_fix, verdict_exit_code,
};
pub use sectionguard_repo::WriteTarget;
pub use validate::{ValidateInput, ValidateOutput, run_validate};
