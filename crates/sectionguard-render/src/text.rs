use crate::group::{group_issues, plural, severity_heading};
use crate::{RenderableIssue, RenderableReport};

/// Plain-text report for terminals, grouped by severity then category.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();
    let templates = plural(report.data.templates_scanned, "template", "templates");

    if report.data.issues_total == 0 {
        out.push_str(&format!(
            "sectionguard: {} (no issues in {})\n",
            report.verdict.label(),
            templates
        ));
        return out;
    }

    out.push_str(&format!(
        "sectionguard: {} ({}, {} in {})\n",
        report.verdict.label(),
        plural(report.data.errors, "error", "errors"),
        plural(report.data.warnings, "warning", "warnings"),
        templates
    ));

    for group in group_issues(&report.issues) {
        out.push_str(&format!("\n{}:\n", severity_heading(group.severity)));
        for category in group.categories {
            out.push_str(&format!("  {} ({})\n", category.code, category.issues.len()));
            for issue in category.issues {
                push_issue(&mut out, issue);
            }
        }
    }

    if let Some(reason) = &report.data.truncated_reason {
        out.push_str(&format!("\nnote: {}\n", reason));
    }
    out
}

fn push_issue(out: &mut String, issue: &RenderableIssue) {
    match &issue.location {
        Some(loc) => out.push_str(&format!("    {} [{}] {}\n", loc, issue.template, issue.message)),
        None => out.push_str(&format!("    [{}] {}\n", issue.template, issue.message)),
    }
    if let Some(suggestion) = &issue.suggestion {
        out.push_str(&format!("      suggestion: {}\n", suggestion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue, report};
    use crate::{RenderableSeverity, RenderableVerdictStatus};

    #[test]
    fn clean_report_is_one_line() {
        let text = render_text(&report(RenderableVerdictStatus::Pass, Vec::new(), 4));
        assert_eq!(text, "sectionguard: PASS (no issues in 4 templates)\n");
    }

    #[test]
    fn groups_errors_before_warnings_and_categories_in_check_order() {
        let issues = vec![
            issue(RenderableSeverity::Warning, "invalid_modifier", "A", 12),
            issue(RenderableSeverity::Error, "invalid_locator", "A", 9),
            issue(RenderableSeverity::Error, "wrong_entity_context", "B", 30),
            issue(RenderableSeverity::Warning, "unknown_entity", "C", 44),
        ];
        let text = render_text(&report(RenderableVerdictStatus::Fail, issues, 3));
        insta::assert_snapshot!(text, @r"
        sectionguard: FAIL (2 errors, 2 warnings in 3 templates)

        Errors:
          wrong_entity_context (1)
            mods/a.txt:30 [B] wrong_entity_context in B
          invalid_locator (1)
            mods/a.txt:9 [A] invalid_locator in A

        Warnings:
          unknown_entity (1)
            mods/a.txt:44 [C] unknown_entity in C
          invalid_modifier (1)
            mods/a.txt:12 [A] invalid_modifier in A
        ");
    }

    #[test]
    fn suggestion_and_truncation_note() {
        let mut first = issue(RenderableSeverity::Warning, "invalid_tech", "A", 3);
        first.suggestion = Some("tech_mass_drivers_2".to_string());
        let mut r = report(RenderableVerdictStatus::Warn, vec![first], 1);
        r.data.issues_total = 5;
        r.data.truncated_reason = Some("issues truncated to max_issues=1".to_string());

        let text = render_text(&r);
        assert!(text.contains("      suggestion: tech_mass_drivers_2\n"));
        assert!(text.ends_with("\nnote: issues truncated to max_issues=1\n"));
    }
}
