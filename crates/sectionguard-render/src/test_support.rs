use crate::{
    RenderableData, RenderableIssue, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};

pub(crate) fn issue(
    severity: RenderableSeverity,
    code: &str,
    template: &str,
    line: u32,
) -> RenderableIssue {
    RenderableIssue {
        severity,
        check_id: format!("section.{code}"),
        code: code.to_string(),
        template: template.to_string(),
        identifier: "x".to_string(),
        suggestion: None,
        message: format!("{code} in {template}"),
        location: Some(RenderableLocation {
            path: "mods/a.txt".to_string(),
            line: Some(line),
        }),
        help: None,
    }
}

pub(crate) fn report(
    verdict: RenderableVerdictStatus,
    issues: Vec<RenderableIssue>,
    templates_scanned: u32,
) -> RenderableReport {
    let errors = issues
        .iter()
        .filter(|i| i.severity == RenderableSeverity::Error)
        .count() as u32;
    let total = issues.len() as u32;
    RenderableReport {
        verdict,
        data: RenderableData {
            profile: "strict".to_string(),
            templates_scanned,
            issues_emitted: total,
            issues_total: total,
            errors,
            warnings: total - errors,
            truncated_reason: None,
        },
        issues,
    }
}
