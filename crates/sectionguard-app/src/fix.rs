//! The `fix` use case: apply the fixer rule chain and write fixed template files.

use crate::config::resolve_config_text;
use crate::report::tool_meta;
use crate::validate::load_reference;
use anyhow::Context;
use camino::Utf8Path;
use sectionguard_repo::WriteTarget;
use sectionguard_settings::Overrides;
use sectionguard_types::{FixData, FixReport, SCHEMA_FIX_V1};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct FixInput<'a> {
    pub mod_root: &'a Utf8Path,
    pub templates_dir: &'a Utf8Path,
    pub reference_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Where fixed files go; `None` computes changes without writing.
    pub target: Option<WriteTarget>,
}

#[derive(Clone, Debug)]
pub struct FixOutput {
    pub report: FixReport,
}

pub fn run_fix(input: FixInput<'_>) -> anyhow::Result<FixOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve_config_text(input.config_text, input.overrides.clone())?;
    let reference = load_reference(input.reference_path, &resolved)?;

    let (sources, mut set) =
        sectionguard_repo::load_template_set(input.mod_root, input.templates_dir)
            .context("load mod templates")?;
    let templates_scanned = set.templates.len() as u32;

    let outcome = sectionguard_domain::fix(&reference, &mut set, &resolved.effective);

    let files_written = match &input.target {
        Some(target) => {
            sectionguard_repo::write_fixed_files(&sources, &outcome.edits_by_file(), target)
                .context("write fixed templates")?
        }
        None => Vec::new(),
    };

    let changes: Vec<_> = outcome.changes().cloned().collect();
    tracing::info!(
        changes = changes.len(),
        unresolved = outcome.unresolved.len(),
        files_written = files_written.len(),
        "fix finished"
    );

    let data = FixData {
        profile: resolved.effective.profile.clone(),
        files_scanned: sources.len() as u32,
        templates_scanned,
        templates_changed: outcome.templates_changed,
        changes_total: changes.len() as u32,
        unresolved_total: outcome.unresolved.len() as u32,
        dry_run: input.target.is_none(),
        files_written,
    };

    Ok(FixOutput {
        report: FixReport {
            schema: SCHEMA_FIX_V1.to_string(),
            tool: tool_meta(),
            started_at,
            finished_at: OffsetDateTime::now_utc(),
            changes,
            unresolved: outcome.unresolved,
            data,
        },
    })
}
