use crate::group::plural;
use crate::{RenderableChange, RenderableFix};

/// Plain-text summary of a fix run.
pub fn render_fix_text(fix: &RenderableFix) -> String {
    let mut out = String::new();
    let verb = if fix.dry_run { "would change" } else { "changed" };
    out.push_str(&format!(
        "sectionguard fix: {} {} of {} ({})\n",
        verb,
        fix.templates_changed,
        plural(fix.templates_scanned, "template", "templates"),
        plural(fix.changes.len() as u32, "change", "changes"),
    ));

    for change in &fix.changes {
        out.push_str(&format!(
            "  {} [{}] {}: {}\n",
            change.location,
            change.template,
            change.rule,
            describe(change)
        ));
    }

    if !fix.unresolved.is_empty() {
        out.push_str(&format!("\nnot auto-fixable ({}):\n", fix.unresolved.len()));
        for issue in &fix.unresolved {
            let loc = issue
                .location
                .as_ref()
                .map(|l| format!("{} ", l))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {}[{}] {}: {}\n",
                loc, issue.template, issue.code, issue.message
            ));
        }
    }

    if !fix.files_written.is_empty() {
        out.push_str("\nfiles written:\n");
        for path in &fix.files_written {
            out.push_str(&format!("  {}\n", path));
        }
    }
    out
}

fn describe(change: &RenderableChange) -> String {
    match (&change.before, &change.after) {
        (Some(before), Some(after)) => format!("{} -> {}", before, after),
        (Some(before), None) => format!("removed {}", before),
        (None, Some(after)) => format!("set {}", after),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableLocation;
    use crate::RenderableSeverity;
    use crate::test_support::issue;

    fn change(rule: &str, before: Option<&str>, after: Option<&str>) -> RenderableChange {
        RenderableChange {
            rule: rule.to_string(),
            template: "MY_STERN".to_string(),
            location: RenderableLocation {
                path: "mods/a.txt".to_string(),
                line: Some(6),
            },
            before: before.map(str::to_string),
            after: after.map(str::to_string),
        }
    }

    #[test]
    fn lists_changes_unresolved_and_written_files() {
        let fix = RenderableFix {
            dry_run: false,
            templates_scanned: 4,
            templates_changed: 1,
            changes: vec![
                change(
                    "fix.alternative_entity",
                    Some("cruiser_bow_L1_entity"),
                    Some("cruiser_stern_entity"),
                ),
                change("fix.remove_tech", Some("tech_gone"), None),
            ],
            unresolved: vec![issue(RenderableSeverity::Error, "invalid_slot", "MY_KEEL", 20)],
            files_written: vec!["mods/a.txt".to_string()],
        };
        insta::assert_snapshot!(render_fix_text(&fix), @r"
        sectionguard fix: changed 1 of 4 templates (2 changes)
          mods/a.txt:6 [MY_STERN] fix.alternative_entity: cruiser_bow_L1_entity -> cruiser_stern_entity
          mods/a.txt:6 [MY_STERN] fix.remove_tech: removed tech_gone

        not auto-fixable (1):
          mods/a.txt:20 [MY_KEEL] invalid_slot: invalid_slot in MY_KEEL

        files written:
          mods/a.txt
        ");
    }

    #[test]
    fn dry_run_wording() {
        let fix = RenderableFix {
            dry_run: true,
            templates_scanned: 1,
            templates_changed: 0,
            changes: Vec::new(),
            unresolved: Vec::new(),
            files_written: Vec::new(),
        };
        assert_eq!(
            render_fix_text(&fix),
            "sectionguard fix: would change 0 of 1 template (0 changes)\n"
        );
    }
}
