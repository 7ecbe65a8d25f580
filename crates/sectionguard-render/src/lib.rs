//! Rendering utilities for terminals and CI surfaces (text, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod balance;
mod fix;
mod gha;
mod group;
mod markdown;
mod model;
mod text;

#[cfg(test)]
mod test_support;

pub use balance::render_balance_table;
pub use fix::render_fix_text;
pub use gha::render_github_annotations;
pub use markdown::{render_fix_markdown, render_markdown};
pub use model::{
    RenderableChange, RenderableData, RenderableFix, RenderableIssue, RenderableLocation,
    RenderableReport, RenderableSeverity, RenderableVerdictStatus,
};
pub use text::render_text;
