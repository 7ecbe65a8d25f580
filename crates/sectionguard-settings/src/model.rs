use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `sectionguard.toml` schema v1.
///
/// User-facing and permissive: every key is optional and falls back to the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionguardConfigV1 {
    /// Optional schema string for tooling (`sectionguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `warn` or `lenient`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail validation: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many issues to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_issues: Option<u32>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,

    /// Extra slot aliases (alias -> slot), merged over the built-in ones.
    #[serde(default)]
    pub slot_aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub fixer: FixerConfig,

    #[serde(default)]
    pub curated: CuratedConfig,

    #[serde(default)]
    pub balance: BalanceConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `warning` or `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Glob patterns for identifiers the check treats as valid.
    #[serde(default)]
    pub allow: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FixerConfig {
    /// `"ship_type.slot"` -> entity used when no alternative entity fits.
    #[serde(default)]
    pub default_entities: BTreeMap<String, String>,

    /// Locator families, tried before the built-in table.
    #[serde(default)]
    pub locator_equivalents: Vec<LocatorFamilyConfig>,

    /// Fall back to the entity with the most locators in the context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub richest_entity_fallback: Option<bool>,

    /// Rename keys whose declared tier disagrees with the computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_tiers: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocatorFamilyConfig {
    /// Locator name prefix the family applies to.
    pub family: String,
    /// Locator prefixes to try, in order.
    pub prefer: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CuratedConfig {
    #[serde(default)]
    pub extra_modifiers: Vec<String>,

    #[serde(default)]
    pub extra_technologies: Vec<String>,

    /// Invalid modifier -> replacement; an empty string means "remove".
    #[serde(default)]
    pub modifier_replacements: BTreeMap<String, String>,

    #[serde(default)]
    pub tech_replacements: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BalanceConfig {
    /// Component template -> points.
    #[serde(default)]
    pub weapon_costs: BTreeMap<String, u32>,

    /// Ship type -> points per auxiliary slot.
    #[serde(default)]
    pub aux_costs: BTreeMap<String, u32>,
}
