use crate::group::{group_issues, severity_heading};
use crate::{RenderableFix, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# sectionguard report\n\n");
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: `{}`\n- Templates scanned: {}\n- Issues: {} (emitted) / {} (total), {} errors, {} warnings\n\n",
        report.verdict.label(),
        report.data.profile,
        report.data.templates_scanned,
        report.data.issues_emitted,
        report.data.issues_total,
        report.data.errors,
        report.data.warnings,
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.issues.is_empty() {
        out.push_str("No issues.\n");
        return out;
    }

    for group in group_issues(&report.issues) {
        out.push_str(&format!("## {}\n\n", severity_heading(group.severity)));
        for category in group.categories {
            out.push_str(&format!("### `{}` ({})\n\n", category.code, category.issues.len()));
            for issue in category.issues {
                let loc = issue
                    .location
                    .as_ref()
                    .map(|l| format!(" (`{}`)", l))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "- **{}**: {}{}\n",
                    issue.template, issue.message, loc
                ));
                if let Some(suggestion) = &issue.suggestion {
                    out.push_str(&format!("  - suggestion: `{}`\n", suggestion));
                }
                if let Some(help) = &issue.help {
                    out.push_str(&format!("  - help: {}\n", help));
                }
            }
            out.push('\n');
        }
    }

    out
}

/// Markdown summary of a fix run.
pub fn render_fix_markdown(fix: &RenderableFix) -> String {
    let mut out = String::new();
    out.push_str("# sectionguard fix\n\n");
    if fix.dry_run {
        out.push_str("> Dry run: no files were written.\n\n");
    }
    out.push_str(&format!(
        "- Templates changed: {} / {}\n- Changes: {}\n- Not auto-fixable: {}\n\n",
        fix.templates_changed,
        fix.templates_scanned,
        fix.changes.len(),
        fix.unresolved.len()
    ));

    if !fix.changes.is_empty() {
        out.push_str("## Changes\n\n| Template | Location | Rule | Before | After |\n|---|---|---|---|---|\n");
        for c in &fix.changes {
            out.push_str(&format!(
                "| {} | `{}` | `{}` | {} | {} |\n",
                c.template,
                c.location,
                c.rule,
                cell(c.before.as_deref()),
                cell(c.after.as_deref())
            ));
        }
        out.push('\n');
    }

    if !fix.unresolved.is_empty() {
        out.push_str("## Not auto-fixable\n\n");
        for issue in &fix.unresolved {
            out.push_str(&format!("- **{}** `{}`: {}\n", issue.template, issue.code, issue.message));
        }
    }
    out
}

fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("`{}`", v),
        None => "(removed)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue, report};
    use crate::{RenderableChange, RenderableLocation, RenderableSeverity, RenderableVerdictStatus};

    #[test]
    fn renders_empty_report() {
        let md = render_markdown(&report(RenderableVerdictStatus::Pass, Vec::new(), 2));
        assert!(md.starts_with("# sectionguard report\n"));
        assert!(md.contains("- Verdict: **PASS**"));
        assert!(md.contains("No issues."));
    }

    #[test]
    fn renders_grouped_issues_with_help_and_truncation() {
        let mut wrong = issue(RenderableSeverity::Error, "wrong_entity_context", "MY_STERN", 6);
        wrong.suggestion = Some("cruiser_stern_entity".to_string());
        wrong.help = Some("Use an entity defined for this slot.".to_string());
        let mut r = report(
            RenderableVerdictStatus::Fail,
            vec![
                issue(RenderableSeverity::Warning, "invalid_tech", "MY_BOW", 3),
                wrong,
            ],
            2,
        );
        r.data.truncated_reason = Some("issues truncated to max_issues=2".to_string());

        let md = render_markdown(&r);
        assert!(md.contains("- Verdict: **FAIL**"));
        assert!(md.contains("> Note: issues truncated to max_issues=2"));
        let errors = md.find("## Errors").expect("errors heading");
        let warnings = md.find("## Warnings").expect("warnings heading");
        assert!(errors < warnings);
        assert!(md.contains("### `wrong_entity_context` (1)"));
        assert!(md.contains("- **MY_STERN**: wrong_entity_context in MY_STERN (`mods/a.txt:6`)"));
        assert!(md.contains("  - suggestion: `cruiser_stern_entity`"));
        assert!(md.contains("  - help: Use an entity defined for this slot."));
    }

    #[test]
    fn fix_markdown_lists_changes_and_removals() {
        let fix = RenderableFix {
            dry_run: true,
            templates_scanned: 3,
            templates_changed: 1,
            changes: vec![RenderableChange {
                rule: "fix.remove_modifier".to_string(),
                template: "MY_BOW".to_string(),
                location: RenderableLocation {
                    path: "mods/a.txt".to_string(),
                    line: Some(14),
                },
                before: Some("fleet_command_limit_add".to_string()),
                after: None,
            }],
            unresolved: vec![issue(RenderableSeverity::Error, "invalid_slot", "MY_KEEL", 20)],
            files_written: Vec::new(),
        };
        let md = render_fix_markdown(&fix);
        assert!(md.contains("> Dry run: no files were written."));
        assert!(md.contains(
            "| MY_BOW | `mods/a.txt:14` | `fix.remove_modifier` | `fleet_command_limit_add` | (removed) |"
        ));
        assert!(md.contains("- **MY_KEEL** `invalid_slot`: invalid_slot in MY_KEEL"));
    }
}
