//! Automatic repair of validation issues.
//!
//! Each template is checked, every issue is offered to the rule chain (first rule that
//! applies wins), and the template is re-checked until nothing changes. Fixes mutate the
//! in-memory template and record a [`TextEdit`] against the original source so the file
//! can be rewritten without reformatting.

use crate::balance::{self, Tier};
use crate::checks::{CheckContext, check_template};
use crate::engine::ordered_templates_mut;
use crate::model::{SectionTemplate, TemplateSet};
use crate::policy::EffectiveConfig;
use sectionguard_script::{Span, TextEdit};
use sectionguard_types::{FixChange, ReferenceDocument, RepoPath, ValidationIssue, ids};
use std::collections::BTreeMap;

mod locators;
mod rules;

pub use locators::equivalent_locator;
pub use rules::{FixRule, RULES};

/// Upper bound on check/fix rounds per template. Every applied fix removes an issue
/// without creating a new one in an earlier check, so real templates settle in two or
/// three rounds.
const MAX_PASSES: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedFix {
    pub change: FixChange,
    pub path: RepoPath,
    /// `None` for templates that were not read from a file.
    pub edit: Option<TextEdit>,
}

#[derive(Clone, Debug, Default)]
pub struct FixOutcome {
    pub changes: Vec<AppliedFix>,
    pub unresolved: Vec<ValidationIssue>,
    pub templates_changed: u32,
}

impl FixOutcome {
    /// Text edits grouped per file, never overlapping.
    ///
    /// A later edit supersedes every earlier edit inside its span, so deleting an entry
    /// drops a rename recorded within it. An edit that falls inside an earlier deletion
    /// is dropped.
    pub fn edits_by_file(&self) -> BTreeMap<RepoPath, Vec<TextEdit>> {
        let mut by_file: BTreeMap<RepoPath, Vec<TextEdit>> = BTreeMap::new();
        for applied in &self.changes {
            let Some(edit) = &applied.edit else {
                continue;
            };
            let edits = by_file.entry(applied.path.clone()).or_default();
            if edits
                .iter()
                .any(|e| e.is_delete() && e.span != edit.span && e.span.contains(edit.span))
            {
                continue;
            }
            edits.retain(|e| !edit.span.contains(e.span));
            edits.push(edit.clone());
        }
        by_file
    }

    pub fn changes(&self) -> impl Iterator<Item = &FixChange> {
        self.changes.iter().map(|a| &a.change)
    }
}

/// Fix every template of `set` in place.
pub fn fix(reference: &ReferenceDocument, set: &mut TemplateSet, cfg: &EffectiveConfig) -> FixOutcome {
    let ctx = CheckContext::new(reference, cfg);
    let mut outcome = FixOutcome::default();

    for template in ordered_templates_mut(&mut set.templates) {
        let before = outcome.changes.len();
        fix_template(&ctx, cfg, template, &mut outcome);
        if cfg.fixer.rename_tiers {
            rename_declared_tier(cfg, template, &mut outcome.changes);
        }
        if outcome.changes.len() > before {
            outcome.templates_changed += 1;
        }
    }

    for issue in &outcome.unresolved {
        tracing::warn!(
            template = %issue.template,
            code = %issue.code,
            identifier = %issue.identifier,
            "not auto-fixable"
        );
    }
    outcome
}

fn fix_template(
    ctx: &CheckContext<'_>,
    cfg: &EffectiveConfig,
    template: &mut SectionTemplate,
    outcome: &mut FixOutcome,
) {
    for _ in 0..MAX_PASSES {
        let mut issues = Vec::new();
        check_template(ctx, template, &mut issues);
        if issues.is_empty() {
            return;
        }

        let mut progressed = false;
        let mut left = Vec::new();
        for issue in issues {
            let mut fixer = Fixer {
                reference: ctx.reference,
                cfg,
                template: &mut *template,
                changes: &mut outcome.changes,
            };
            if fixer.apply(&issue) {
                progressed = true;
            } else {
                left.push(issue);
            }
        }
        if !progressed {
            outcome.unresolved.extend(left);
            return;
        }
    }

    let mut issues = Vec::new();
    check_template(ctx, template, &mut issues);
    outcome.unresolved.extend(issues);
}

/// Point the key's tier token at the tier its points fall in. Scored after the rule
/// chain since dropped component slots change the total.
fn rename_declared_tier(
    cfg: &EffectiveConfig,
    template: &mut SectionTemplate,
    changes: &mut Vec<AppliedFix>,
) {
    let score = balance::score_template(template, &cfg.balance);
    if !score.tier_mismatch {
        return;
    }
    let Some(key) = balance::rename_tier(&template.key, Tier::from_points(score.points)) else {
        return;
    };
    tracing::debug!(template = %template.key, renamed = %key, points = score.points, "renamed tier");
    changes.push(AppliedFix {
        change: FixChange {
            rule: ids::FIX_RENAME_TIER.to_string(),
            code: ids::CODE_TIER_MISMATCH.to_string(),
            template: template.key.clone(),
            location: template.location(template.key_span.map(|s| s.line)),
            before: Some(template.key.clone()),
            after: Some(key.clone()),
        },
        path: template.path.clone(),
        edit: template.key_span.map(|s| TextEdit::replace(s, key.as_str())),
    });
    template.key = key;
}

/// Mutable state handed to a rule.
pub struct Fixer<'a, 'b> {
    pub reference: &'a ReferenceDocument,
    pub cfg: &'a EffectiveConfig,
    pub template: &'b mut SectionTemplate,
    changes: &'b mut Vec<AppliedFix>,
}

impl Fixer<'_, '_> {
    fn apply(&mut self, issue: &ValidationIssue) -> bool {
        for rule in RULES {
            if (rule.applies)(issue) && (rule.apply)(self, issue) {
                tracing::debug!(template = %self.template.key, rule = rule.id, "applied fix");
                return true;
            }
        }
        false
    }

    /// Record one change. `span` is the source text it replaces (or deletes, when
    /// `after` is `None`).
    pub fn record(
        &mut self,
        rule: &str,
        issue: &ValidationIssue,
        span: Option<Span>,
        before: Option<&str>,
        after: Option<&str>,
    ) {
        let line = span.map(|s| s.line);
        let edit = span.map(|s| match after {
            Some(text) => TextEdit::replace(s, text),
            None => TextEdit::delete(s),
        });
        self.changes.push(AppliedFix {
            change: FixChange {
                rule: rule.to_string(),
                code: issue.code.clone(),
                template: self.template.key.clone(),
                location: self.template.location(line),
                before: before.map(str::to_string),
                after: after.map(str::to_string),
            },
            path: self.template.path.clone(),
            edit,
        });
    }
}
