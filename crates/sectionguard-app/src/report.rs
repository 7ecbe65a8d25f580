use anyhow::Context;
use sectionguard_render::{
    RenderableChange, RenderableData, RenderableFix, RenderableIssue, RenderableLocation,
    RenderableReport, RenderableSeverity, RenderableVerdictStatus,
};
use sectionguard_types::{
    FixChange, FixData, FixReport, Location, SCHEMA_FIX_V1, SCHEMA_VALIDATION_V1, Severity,
    ToolMeta, ValidationData, ValidationIssue, ValidationReport, Verdict, ids,
};
use serde::Serialize;
use std::collections::BTreeMap;
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta::current(env!("CARGO_PKG_VERSION"))
}

pub fn parse_validation_report(text: &str) -> anyhow::Result<ValidationReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_VALIDATION_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }
    serde_json::from_value(value).context("parse sectionguard validation report")
}

pub fn parse_fix_report(text: &str) -> anyhow::Result<FixReport> {
    let report: FixReport = serde_json::from_str(text).context("parse fix report json")?;
    if report.schema != SCHEMA_FIX_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

/// Pretty JSON with a trailing newline.
pub fn serialize_report<T: Serialize>(report: &T) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn runtime_issue(message: &str) -> ValidationIssue {
    ValidationIssue {
        severity: Severity::Error,
        check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
        code: ids::CODE_RUNTIME_ERROR.to_string(),
        template: String::new(),
        identifier: String::new(),
        suggestion: None,
        message: message.to_string(),
        location: None,
        help: Some("Fix the tool error and re-run sectionguard.".to_string()),
        fingerprint: None,
        data: serde_json::Value::Null,
    }
}

/// Report written when validation could not run at all.
pub fn runtime_error_report(message: &str) -> ValidationReport {
    let now = OffsetDateTime::now_utc();
    let mut by_category = BTreeMap::new();
    by_category.insert(ids::CODE_RUNTIME_ERROR.to_string(), 1);
    ValidationReport {
        schema: SCHEMA_VALIDATION_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        issues: vec![runtime_issue(message)],
        data: ValidationData {
            profile: "unknown".to_string(),
            issues_total: 1,
            issues_emitted: 1,
            errors: 1,
            by_category,
            ..ValidationData::default()
        },
    }
}

/// Fix report written when the fixer could not run at all.
pub fn runtime_error_fix_report(message: &str, dry_run: bool) -> FixReport {
    let now = OffsetDateTime::now_utc();
    FixReport {
        schema: SCHEMA_FIX_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        changes: Vec::new(),
        unresolved: vec![runtime_issue(message)],
        data: FixData {
            profile: "unknown".to_string(),
            unresolved_total: 1,
            dry_run,
            ..FixData::default()
        },
    }
}

fn renderable_severity(severity: Severity) -> RenderableSeverity {
    match severity {
        Severity::Error => RenderableSeverity::Error,
        Severity::Warning => RenderableSeverity::Warning,
    }
}

fn renderable_location(loc: &Location) -> RenderableLocation {
    RenderableLocation {
        path: loc.path.as_str().to_string(),
        line: loc.line,
    }
}

fn renderable_issue(issue: &ValidationIssue) -> RenderableIssue {
    RenderableIssue {
        severity: renderable_severity(issue.severity),
        check_id: issue.check_id.clone(),
        code: issue.code.clone(),
        template: issue.template.clone(),
        identifier: issue.identifier.clone(),
        suggestion: issue.suggestion.clone(),
        message: issue.message.clone(),
        location: issue.location.as_ref().map(renderable_location),
        help: issue.help.clone(),
    }
}

pub fn to_renderable(report: &ValidationReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        issues: report.issues.iter().map(renderable_issue).collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            templates_scanned: report.data.templates_scanned,
            issues_emitted: report.data.issues_emitted,
            issues_total: report.data.issues_total,
            errors: report.data.errors,
            warnings: report.data.warnings,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_change(change: &FixChange) -> RenderableChange {
    RenderableChange {
        rule: change.rule.clone(),
        template: change.template.clone(),
        location: renderable_location(&change.location),
        before: change.before.clone(),
        after: change.after.clone(),
    }
}

pub fn to_renderable_fix(report: &FixReport) -> RenderableFix {
    RenderableFix {
        dry_run: report.data.dry_run,
        templates_scanned: report.data.templates_scanned,
        templates_changed: report.data.templates_changed,
        changes: report.changes.iter().map(renderable_change).collect(),
        unresolved: report.unresolved.iter().map(renderable_issue).collect(),
        files_written: report
            .data
            .files_written
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
