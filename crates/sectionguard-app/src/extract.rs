//! The `extract` use case: build the reference document from a game install.

use crate::config::resolve_config_text;
use anyhow::Context;
use camino::Utf8Path;
use sectionguard_settings::Overrides;
use sectionguard_types::{ReferenceDocument, ToolMeta};

#[derive(Clone, Debug)]
pub struct ExtractInput<'a> {
    /// Game install root (the directory containing `common/`).
    pub game_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct ExtractOutput {
    pub reference: ReferenceDocument,
}

pub fn run_extract(input: ExtractInput<'_>) -> anyhow::Result<ExtractOutput> {
    let resolved = resolve_config_text(input.config_text, input.overrides)?;
    let reference = sectionguard_repo::extract_reference(
        input.game_dir,
        resolved.effective.curated,
        ToolMeta::current(env!("CARGO_PKG_VERSION")),
    )
    .with_context(|| format!("extract reference data from {}", input.game_dir))?;
    Ok(ExtractOutput { reference })
}

/// One-line summary for the terminal.
pub fn format_extract_summary(reference: &ReferenceDocument) -> String {
    let meta = &reference.extraction;
    format!(
        "extracted {} ship types, {} entities, {} modifiers, {} technologies from {} files ({} skipped)",
        reference.ship_types.len(),
        reference.entities.len(),
        reference.modifiers.valid.len(),
        reference.technologies.valid.len(),
        meta.files_parsed,
        meta.files_skipped
    )
}
