//! The `validate` use case: check mod templates against the reference document.

use crate::config::resolve_config_text;
use crate::report::tool_meta;
use anyhow::Context;
use camino::Utf8Path;
use sectionguard_settings::{Overrides, ResolvedConfig};
use sectionguard_types::{ReferenceDocument, SCHEMA_VALIDATION_V1, ValidationReport};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    /// Mod root; report paths are relative to it.
    pub mod_root: &'a Utf8Path,
    /// Directory holding the mod's section templates.
    pub templates_dir: &'a Utf8Path,
    /// Persisted reference document.
    pub reference_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub report: ValidationReport,
    pub resolved_config: ResolvedConfig,
}

/// Load the reference document and overlay the configured curated tables.
pub(crate) fn load_reference(
    path: &Utf8Path,
    resolved: &ResolvedConfig,
) -> anyhow::Result<ReferenceDocument> {
    let mut reference = sectionguard_repo::read_reference(path).context("load reference data")?;
    resolved.effective.curated.apply_to(&mut reference);
    Ok(reference)
}

pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve_config_text(input.config_text, input.overrides.clone())?;
    let reference = load_reference(input.reference_path, &resolved)?;

    let (_, set) = sectionguard_repo::load_template_set(input.mod_root, input.templates_dir)
        .context("load mod templates")?;

    let domain_report = sectionguard_domain::validate(&reference, &set, &resolved.effective);
    tracing::info!(
        templates = domain_report.data.templates_scanned,
        errors = domain_report.counts.error,
        warnings = domain_report.counts.warning,
        "validation finished"
    );

    let report = ValidationReport {
        schema: SCHEMA_VALIDATION_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: domain_report.verdict,
        issues: domain_report.issues,
        data: domain_report.data,
    };

    Ok(ValidateOutput {
        report,
        resolved_config: resolved,
    })
}
