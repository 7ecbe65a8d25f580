use crate::{RenderableIssue, RenderableSeverity};
use sectionguard_types::IssueCategory;

pub(crate) struct CategoryGroup<'a> {
    pub code: &'a str,
    pub issues: Vec<&'a RenderableIssue>,
}

pub(crate) struct SeverityGroup<'a> {
    pub severity: RenderableSeverity,
    pub categories: Vec<CategoryGroup<'a>>,
}

fn category_rank(code: &str) -> usize {
    IssueCategory::from_code(code)
        .and_then(|c| IssueCategory::ALL.iter().position(|x| *x == c))
        .unwrap_or(IssueCategory::ALL.len())
}

/// Errors before warnings, categories in check order, issues in report order.
pub(crate) fn group_issues(issues: &[RenderableIssue]) -> Vec<SeverityGroup<'_>> {
    let mut sorted: Vec<&RenderableIssue> = issues.iter().collect();
    sorted.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| category_rank(&a.code).cmp(&category_rank(&b.code)))
            .then_with(|| a.code.cmp(&b.code))
    });

    let mut out: Vec<SeverityGroup<'_>> = Vec::new();
    for issue in sorted {
        if out.last().is_none_or(|g| g.severity != issue.severity) {
            out.push(SeverityGroup {
                severity: issue.severity,
                categories: Vec::new(),
            });
        }
        let Some(group) = out.last_mut() else {
            continue;
        };
        match group.categories.last_mut() {
            Some(cat) if cat.code == issue.code => cat.issues.push(issue),
            _ => group.categories.push(CategoryGroup {
                code: &issue.code,
                issues: vec![issue],
            }),
        }
    }
    out
}

pub(crate) fn severity_heading(severity: RenderableSeverity) -> &'static str {
    match severity {
        RenderableSeverity::Error => "Errors",
        RenderableSeverity::Warning => "Warnings",
    }
}

pub(crate) fn plural(n: u32, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
