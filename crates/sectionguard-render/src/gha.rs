use crate::{RenderableIssue, RenderableReport, RenderableSeverity};

/// Render issues as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report.issues.iter().map(annotation).collect()
}

fn annotation(issue: &RenderableIssue) -> String {
    let level = match issue.severity {
        RenderableSeverity::Error => "error",
        RenderableSeverity::Warning => "warning",
    };

    let mut meta = String::new();
    if let Some(loc) = &issue.location {
        meta.push_str(&format!("file={}", escape_property(&loc.path)));
        if let Some(line) = loc.line {
            meta.push_str(&format!(",line={}", line));
        }
    }

    let message = escape_data(&format!(
        "[{}:{}] {}: {}",
        issue.check_id, issue.code, issue.template, issue.message
    ));

    if meta.is_empty() {
        format!("::{}::{}", level, message)
    } else {
        format!("::{} {}::{}", level, meta, message)
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableVerdictStatus;
    use crate::test_support::{issue, report};

    #[test]
    fn one_annotation_per_issue_with_file_and_line() {
        let r = report(
            RenderableVerdictStatus::Fail,
            vec![
                issue(RenderableSeverity::Error, "invalid_slot", "MY_KEEL", 20),
                issue(RenderableSeverity::Warning, "invalid_tech", "MY_BOW", 3),
            ],
            2,
        );
        let lines = render_github_annotations(&r);
        assert_eq!(
            lines,
            vec![
                "::error file=mods/a.txt,line=20::[section.invalid_slot:invalid_slot] MY_KEEL: invalid_slot in MY_KEEL",
                "::warning file=mods/a.txt,line=3::[section.invalid_tech:invalid_tech] MY_BOW: invalid_tech in MY_BOW",
            ]
        );
    }

    #[test]
    fn escapes_workflow_command_characters() {
        let mut i = issue(RenderableSeverity::Error, "invalid_slot", "T", 1);
        i.message = "100% broken\r\nnext".to_string();
        i.location = None;
        let lines = render_github_annotations(&report(RenderableVerdictStatus::Fail, vec![i], 1));
        assert_eq!(
            lines[0],
            "::error::[section.invalid_slot:invalid_slot] T: 100%25 broken%0D%0Anext"
        );
    }
}
