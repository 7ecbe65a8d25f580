use crate::checks::{CheckContext, check_all};
use crate::model::{SectionTemplate, TemplateSet};
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, SeverityCounts};
use sectionguard_types::{ReferenceDocument, Severity, ValidationData, ValidationIssue, Verdict};
use std::collections::BTreeMap;

pub fn validate(
    reference: &ReferenceDocument,
    set: &TemplateSet,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let ctx = CheckContext::new(reference, cfg);
    let templates = ordered_templates(&set.templates);
    let issues = check_all(&ctx, &templates);

    let total = issues.len() as u32;
    // Verdict and totals cover every issue, truncated or not.
    let verdict = compute_verdict(&issues, cfg.fail_on);
    let counts = SeverityCounts::from_issues(&issues);
    let mut by_category: BTreeMap<String, u32> = BTreeMap::new();
    for issue in &issues {
        *by_category.entry(issue.code.clone()).or_default() += 1;
    }

    let mut emitted = issues;
    let mut truncated_reason: Option<String> = None;
    if let Some(max) = cfg.max_issues
        && emitted.len() > max
    {
        emitted.truncate(max);
        truncated_reason = Some(format!("issues truncated to max_issues={max}"));
    }

    let data = ValidationData {
        profile: cfg.profile.clone(),
        files_scanned: set.files.len() as u32,
        templates_scanned: set.templates.len() as u32,
        issues_total: total,
        issues_emitted: emitted.len() as u32,
        errors: counts.error,
        warnings: counts.warning,
        by_category,
        truncated_reason,
    };

    DomainReport {
        verdict,
        issues: emitted,
        data,
        counts,
    }
}

/// Templates in (file path, position in file) order.
pub(crate) fn ordered_templates(templates: &[SectionTemplate]) -> Vec<&SectionTemplate> {
    let mut ordered: Vec<&SectionTemplate> = templates.iter().collect();
    ordered.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()).then(a.line.cmp(&b.line)));
    ordered
}

pub(crate) fn ordered_templates_mut(
    templates: &mut [SectionTemplate],
) -> Vec<&mut SectionTemplate> {
    let mut ordered: Vec<&mut SectionTemplate> = templates.iter_mut().collect();
    ordered.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()).then(a.line.cmp(&b.line)));
    ordered
}

fn compute_verdict(issues: &[ValidationIssue], fail_on: FailOn) -> Verdict {
    let has_error = issues.iter().any(|i| i.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = issues.iter().any(|i| i.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cruiser_reference, modifier, template};
    use sectionguard_types::RepoPath;

    fn set(templates: Vec<SectionTemplate>) -> TemplateSet {
        TemplateSet {
            files: vec![RepoPath::new("common/section_templates/mod.txt")],
            templates,
        }
    }

    #[test]
    fn clean_template_passes() {
        let t = template("ok", "cruiser", "bow", Some("cruiser_bow_L1_entity"));
        let report = validate(&cruiser_reference(), &set(vec![t]), &EffectiveConfig::default());
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.issues.is_empty());
        assert_eq!(report.data.templates_scanned, 1);
    }

    #[test]
    fn warnings_become_fail_when_fail_on_warning() {
        let mut t = template("warn", "cruiser", "bow", Some("cruiser_bow_L1_entity"));
        t.modifiers.push(modifier("ship_weapon_damage_mult", "0.1"));
        let mut cfg = EffectiveConfig::default();

        let report = validate(&cruiser_reference(), &set(vec![t.clone()]), &cfg);
        assert_eq!(report.verdict, Verdict::Warn);

        cfg.fail_on = FailOn::Warning;
        let report = validate(&cruiser_reference(), &set(vec![t]), &cfg);
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn truncation_keeps_totals() {
        let templates = (0..5)
            .map(|i| template(&format!("t{i}"), "titan", "mid", None))
            .collect();
        let cfg = EffectiveConfig {
            max_issues: Some(2),
            ..EffectiveConfig::default()
        };
        let report = validate(&cruiser_reference(), &set(templates), &cfg);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.data.issues_total, 5);
        assert_eq!(report.data.issues_emitted, 2);
        assert_eq!(
            report.data.truncated_reason.as_deref(),
            Some("issues truncated to max_issues=2")
        );
        assert_eq!(report.data.by_category.get("invalid_ship_type"), Some(&5));
        assert_eq!(report.data.errors, 5);
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn templates_are_ordered_by_path_then_line() {
        let mut late = template("late", "titan", "mid", None);
        late.path = RepoPath::new("common/section_templates/b.txt");
        let mut second = template("second", "titan", "mid", None);
        second.path = RepoPath::new("common/section_templates/a.txt");
        second.line = 20;
        let mut first = template("first", "titan", "mid", None);
        first.path = RepoPath::new("common/section_templates/a.txt");
        first.line = 3;

        let report = validate(
            &cruiser_reference(),
            &set(vec![late, second, first]),
            &EffectiveConfig::default(),
        );
        let keys: Vec<&str> = report.issues.iter().map(|i| i.template.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "late"]);
    }
}
