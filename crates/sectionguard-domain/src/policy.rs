use crate::balance::BalanceTable;
use crate::curated::CuratedTables;
use sectionguard_types::{IssueCategory, Severity, SlotContext};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
    /// Glob patterns; matching identifiers are treated as valid.
    pub allow: Vec<String>,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
            allow: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Warning,
            allow: Vec::new(),
        }
    }
}

/// Ordered locator preferences for one locator name prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatorFamily {
    pub family: String,
    pub prefer: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixerPolicy {
    pub default_entities: BTreeMap<SlotContext, String>,
    pub locator_equivalents: Vec<LocatorFamily>,
    /// Last resort: the entity with the most locators valid in the context.
    pub richest_entity_fallback: bool,
    /// Rewrite the tier token of keys like `PBSS_CRUISER_BOW_ADVANCED_L2` to match
    /// the points.
    pub rename_tiers: bool,
}

impl Default for FixerPolicy {
    fn default() -> Self {
        Self {
            default_entities: BTreeMap::new(),
            locator_equivalents: default_locator_families(),
            richest_entity_fallback: false,
            rename_tiers: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    /// `None` emits every issue.
    pub max_issues: Option<usize>,
    pub checks: BTreeMap<String, CheckPolicy>,
    /// Alias slot name to canonical slot name.
    pub slot_aliases: BTreeMap<String, String>,
    pub fixer: FixerPolicy,
    pub curated: CuratedTables,
    pub balance: BalanceTable,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            fail_on: FailOn::Error,
            max_issues: None,
            checks: default_checks(),
            slot_aliases: default_slot_aliases(),
            fixer: FixerPolicy::default(),
            curated: CuratedTables::builtin(),
            balance: BalanceTable::default(),
        }
    }
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}

/// Every check enabled at its category's default severity.
pub fn default_checks() -> BTreeMap<String, CheckPolicy> {
    IssueCategory::ALL
        .into_iter()
        .map(|c| (c.check_id().to_string(), CheckPolicy::enabled(c.default_severity())))
        .collect()
}

pub fn default_slot_aliases() -> BTreeMap<String, String> {
    ["core", "ship", "section", "main"]
        .into_iter()
        .map(|alias| (alias.to_string(), "mid".to_string()))
        .collect()
}

pub fn default_locator_families() -> Vec<LocatorFamily> {
    let table: &[(&str, &[&str])] = &[
        ("xl_gun", &["large_gun", "extra_large", "xl_gun"]),
        ("extra_large", &["xl_gun", "large_gun", "extra_large"]),
        ("large_gun", &["large_gun", "xl_gun", "medium_gun"]),
        ("medium_gun", &["medium_gun", "large_gun", "small_gun"]),
        ("small_gun", &["small_gun", "medium_gun", "point_defence"]),
        ("main_body", &["root", "core", "weapon_01"]),
        ("weapon", &["weapon_01", "weapon_02", "root"]),
    ];
    table
        .iter()
        .map(|(family, prefer)| LocatorFamily {
            family: family.to_string(),
            prefer: prefer.iter().map(|p| p.to_string()).collect(),
        })
        .collect()
}
