//! The rule chain, in priority order.

use super::{Fixer, equivalent_locator};
use crate::slots::{ResolvedSlot, resolve_slot};
use sectionguard_types::{IssueCategory, SlotContext, ValidationIssue, ids};
use std::collections::BTreeSet;

pub struct FixRule {
    pub id: &'static str,
    pub applies: fn(&ValidationIssue) -> bool,
    pub apply: fn(&mut Fixer<'_, '_>, &ValidationIssue) -> bool,
}

pub const RULES: &[FixRule] = &[
    FixRule {
        id: ids::FIX_ALTERNATIVE_ENTITY,
        applies: is_entity_issue,
        apply: alternative_entity,
    },
    FixRule {
        id: ids::FIX_DEFAULT_ENTITY,
        applies: is_entity_issue,
        apply: default_entity,
    },
    FixRule {
        id: ids::FIX_RICHEST_ENTITY,
        applies: is_entity_issue,
        apply: richest_entity,
    },
    FixRule {
        id: ids::FIX_REPLACE_MODIFIER,
        applies: is_modifier_issue,
        apply: replace_modifier,
    },
    FixRule {
        id: ids::FIX_REMOVE_MODIFIER,
        applies: is_modifier_issue,
        apply: remove_modifier,
    },
    FixRule {
        id: ids::FIX_REPLACE_TECH,
        applies: is_tech_issue,
        apply: replace_tech,
    },
    FixRule {
        id: ids::FIX_REMOVE_TECH,
        applies: is_tech_issue,
        apply: remove_tech,
    },
    FixRule {
        id: ids::FIX_EQUIVALENT_LOCATOR,
        applies: is_locator_issue,
        apply: equivalent_locator_rule,
    },
    FixRule {
        id: ids::FIX_DROP_LOCATOR,
        applies: is_locator_issue,
        apply: drop_locator,
    },
];

fn is_entity_issue(issue: &ValidationIssue) -> bool {
    matches!(
        issue.category(),
        Some(IssueCategory::WrongEntityContext | IssueCategory::UnknownEntity)
    )
}

fn is_modifier_issue(issue: &ValidationIssue) -> bool {
    issue.category() == Some(IssueCategory::InvalidModifier)
}

fn is_tech_issue(issue: &ValidationIssue) -> bool {
    issue.category() == Some(IssueCategory::InvalidTech)
}

fn is_locator_issue(issue: &ValidationIssue) -> bool {
    issue.category() == Some(IssueCategory::InvalidLocator)
}

fn resolved_slot(fixer: &Fixer<'_, '_>) -> Option<ResolvedSlot> {
    resolve_slot(
        fixer.reference,
        &fixer.template.ship_type.value,
        &fixer.template.slot.value,
        &fixer.cfg.slot_aliases,
    )
}

fn context(fixer: &Fixer<'_, '_>) -> Option<(SlotContext, ResolvedSlot)> {
    let resolved = resolved_slot(fixer)?;
    let ctx = SlotContext::new(fixer.template.ship_type.value.as_str(), resolved.slot.as_str());
    Some((ctx, resolved))
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Valid in the context and defines every locator the template binds. Ties break on
/// the longest shared name prefix, then the most locators, then the name.
fn alternative_entity(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some((ctx, resolved)) = context(fixer) else {
        return false;
    };
    let original = issue.identifier.as_str();
    let used = fixer.template.used_locators();

    let best = fixer
        .reference
        .entities_in(&ctx)
        .filter(|(name, _)| *name != original)
        .filter(|(_, record)| used.iter().all(|l| record.locators.contains(*l)))
        .max_by(|(a, ra), (b, rb)| {
            common_prefix_len(a, original)
                .cmp(&common_prefix_len(b, original))
                .then(ra.locators.len().cmp(&rb.locators.len()))
                .then_with(|| b.cmp(a))
        })
        .map(|(name, _)| name.to_string());

    let Some(name) = best else {
        return false;
    };
    replace_entity(fixer, issue, ids::FIX_ALTERNATIVE_ENTITY, &name, &resolved);
    true
}

/// The configured default for the context, when the reference agrees it is valid there.
fn default_entity(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some((ctx, resolved)) = context(fixer) else {
        return false;
    };
    let Some(name) = fixer.cfg.fixer.default_entities.get(&ctx).cloned() else {
        return false;
    };
    if name == issue.identifier {
        return false;
    }
    let valid = fixer
        .reference
        .entity(&name)
        .is_some_and(|record| record.is_valid_in(&ctx));
    if !valid {
        tracing::debug!(entity = %name, context = %ctx, "configured default entity is not valid here");
        return false;
    }
    replace_entity(fixer, issue, ids::FIX_DEFAULT_ENTITY, &name, &resolved);
    true
}

/// Opt-in: whichever entity valid in the context has the most locators.
fn richest_entity(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    if !fixer.cfg.fixer.richest_entity_fallback {
        return false;
    }
    let Some((ctx, resolved)) = context(fixer) else {
        return false;
    };
    let original = issue.identifier.as_str();
    let best = fixer
        .reference
        .entities_in(&ctx)
        .filter(|(name, _)| *name != original)
        .max_by(|(a, ra), (b, rb)| {
            ra.locators
                .len()
                .cmp(&rb.locators.len())
                .then_with(|| b.cmp(a))
        })
        .map(|(name, _)| name.to_string());

    let Some(name) = best else {
        return false;
    };
    replace_entity(fixer, issue, ids::FIX_RICHEST_ENTITY, &name, &resolved);
    true
}

fn replace_entity(
    fixer: &mut Fixer<'_, '_>,
    issue: &ValidationIssue,
    rule: &str,
    name: &str,
    resolved: &ResolvedSlot,
) {
    let Some(entity) = fixer.template.entity.clone() else {
        return;
    };
    fixer.record(rule, issue, entity.span, Some(entity.value.as_str()), Some(name));
    if let Some(current) = fixer.template.entity.as_mut() {
        current.value = name.to_string();
    }

    // Only a context repair may touch the slot; warning-level repairs never do.
    if issue.category() == Some(IssueCategory::WrongEntityContext)
        && let Some(alias) = &resolved.alias
    {
        let span = fixer.template.slot.span;
        fixer.record(
            ids::FIX_NORMALIZE_SLOT,
            issue,
            span,
            Some(alias.as_str()),
            Some(resolved.slot.as_str()),
        );
        fixer.template.slot.value = resolved.slot.clone();
    }
}

/// Follow replacements from `name` until one is valid. `None` when the chain ends in a
/// removal, an unknown identifier or a loop.
fn valid_replacement<'r>(
    name: &str,
    next: impl Fn(&str) -> Option<&'r str>,
    is_valid: impl Fn(&str) -> bool,
) -> Option<&'r str> {
    let mut seen = BTreeSet::from([name.to_string()]);
    let mut current = next(name)?;
    while !is_valid(current) {
        if !seen.insert(current.to_string()) {
            return None;
        }
        current = next(current)?;
    }
    Some(current)
}

fn modifier_target(fixer: &Fixer<'_, '_>, name: &str) -> Option<String> {
    let reference = fixer.reference;
    let target = valid_replacement(
        name,
        |n| reference.modifier_replacement(n).flatten(),
        |n| reference.is_valid_modifier(n),
    );
    if target.is_none() && reference.modifier_replacement(name).flatten().is_some() {
        tracing::debug!(modifier = %name, "replacement chain ends on an invalid modifier");
    }
    target.map(str::to_string)
}

fn tech_target(fixer: &Fixer<'_, '_>, name: &str) -> Option<String> {
    let reference = fixer.reference;
    let target = valid_replacement(
        name,
        |n| reference.technology_replacement(n),
        |n| reference.is_valid_technology(n),
    );
    if target.is_none() && reference.technology_replacement(name).is_some() {
        tracing::debug!(technology = %name, "replacement chain ends on an invalid technology");
    }
    target.map(str::to_string)
}

fn replace_modifier(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some(to) = modifier_target(fixer, &issue.identifier) else {
        return false;
    };
    let Some(index) = fixer
        .template
        .modifiers
        .iter()
        .position(|m| m.name.value == issue.identifier)
    else {
        return false;
    };
    let span = fixer.template.modifiers[index].name.span;
    fixer.record(
        ids::FIX_REPLACE_MODIFIER,
        issue,
        span,
        Some(issue.identifier.as_str()),
        Some(to.as_str()),
    );
    fixer.template.modifiers[index].name.value = to;
    true
}

fn remove_modifier(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some(index) = fixer
        .template
        .modifiers
        .iter()
        .position(|m| m.name.value == issue.identifier)
    else {
        return false;
    };
    let removed = fixer.template.modifiers.remove(index);
    fixer.record(
        ids::FIX_REMOVE_MODIFIER,
        issue,
        removed.entry,
        Some(issue.identifier.as_str()),
        None,
    );
    true
}

fn replace_tech(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some(to) = tech_target(fixer, &issue.identifier) else {
        return false;
    };
    let Some(index) = fixer
        .template
        .technologies
        .iter()
        .position(|t| t.name.value == issue.identifier)
    else {
        return false;
    };
    let span = fixer.template.technologies[index].name.span;
    fixer.record(
        ids::FIX_REPLACE_TECH,
        issue,
        span,
        Some(issue.identifier.as_str()),
        Some(to.as_str()),
    );
    fixer.template.technologies[index].name.value = to;
    true
}

fn remove_tech(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some(index) = fixer
        .template
        .technologies
        .iter()
        .position(|t| t.name.value == issue.identifier)
    else {
        return false;
    };
    let removed = fixer.template.technologies.remove(index);
    fixer.record(
        ids::FIX_REMOVE_TECH,
        issue,
        removed.removal,
        Some(issue.identifier.as_str()),
        None,
    );
    true
}

fn locator_index(fixer: &Fixer<'_, '_>, issue: &ValidationIssue) -> Option<usize> {
    fixer
        .template
        .component_slots
        .iter()
        .position(|c| c.locator.value == issue.identifier)
}

fn equivalent_locator_rule(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some(record) = fixer
        .template
        .entity_name()
        .and_then(|name| fixer.reference.entity(name))
    else {
        return false;
    };
    let Some(index) = locator_index(fixer, issue) else {
        return false;
    };
    let others: BTreeSet<&str> = fixer
        .template
        .component_slots
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, c)| c.locator.value.as_str())
        .collect();
    let Some(to) = equivalent_locator(
        &issue.identifier,
        &record.locators,
        &others,
        &fixer.cfg.fixer.locator_equivalents,
    ) else {
        return false;
    };

    let span = fixer.template.component_slots[index].locator.span;
    fixer.record(
        ids::FIX_EQUIVALENT_LOCATOR,
        issue,
        span,
        Some(issue.identifier.as_str()),
        Some(to.as_str()),
    );
    fixer.template.component_slots[index].locator.value = to;
    true
}

fn drop_locator(fixer: &mut Fixer<'_, '_>, issue: &ValidationIssue) -> bool {
    let Some(index) = locator_index(fixer, issue) else {
        return false;
    };
    let removed = fixer.template.component_slots.remove(index);
    fixer.record(
        ids::FIX_DROP_LOCATOR,
        issue,
        removed.entry,
        Some(issue.identifier.as_str()),
        None,
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_in_priority_order() {
        let order: Vec<&str> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(
            order,
            vec![
                ids::FIX_ALTERNATIVE_ENTITY,
                ids::FIX_DEFAULT_ENTITY,
                ids::FIX_RICHEST_ENTITY,
                ids::FIX_REPLACE_MODIFIER,
                ids::FIX_REMOVE_MODIFIER,
                ids::FIX_REPLACE_TECH,
                ids::FIX_REMOVE_TECH,
                ids::FIX_EQUIVALENT_LOCATOR,
                ids::FIX_DROP_LOCATOR,
            ]
        );
    }

    #[test]
    fn replacement_chain_stops_at_the_first_valid_name() {
        let chain = |n: &str| match n {
            "a" => Some("b"),
            "b" => Some("c"),
            "c" => Some("a"),
            "x" => Some("y"),
            _ => None,
        };
        assert_eq!(valid_replacement("a", chain, |n| n == "c"), Some("c"));
        assert_eq!(valid_replacement("a", chain, |_| false), None);
        assert_eq!(valid_replacement("x", chain, |_| false), None);
        assert_eq!(valid_replacement("z", chain, |_| true), None);
    }

    #[test]
    fn common_prefix_counts_chars() {
        assert_eq!(common_prefix_len("cruiser_bow_L1", "cruiser_mid_M2"), 8);
        assert_eq!(common_prefix_len("", "abc"), 0);
    }
}
