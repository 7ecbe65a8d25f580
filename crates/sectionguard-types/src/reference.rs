//! The reference document: ground truth extracted from the game install.
//!
//! Built once per extraction run and read-only afterwards. All collections are ordered
//! so the serialized document is byte-stable for identical inputs.

use crate::{RepoPath, ToolMeta};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const SCHEMA_REFERENCE_V1: &str = "sectionguard.reference.v1";

/// A (ship type, slot) pair.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct SlotContext {
    pub ship_type: String,
    pub slot: String,
}

impl SlotContext {
    pub fn new(ship_type: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            ship_type: ship_type.into(),
            slot: slot.into(),
        }
    }
}

impl std::fmt::Display for SlotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.ship_type, self.slot)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntityRecord {
    /// Every (ship type, slot) the entity appears in across the game files.
    pub contexts: BTreeSet<SlotContext>,
    /// Locator names bound by component slots of templates using the entity.
    pub locators: BTreeSet<String>,
    /// Component templates seen on those locators (informational).
    #[serde(default)]
    pub component_templates: BTreeSet<String>,
}

impl EntityRecord {
    pub fn is_valid_in(&self, ctx: &SlotContext) -> bool {
        self.contexts.contains(ctx)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModifierTable {
    pub valid: BTreeSet<String>,
    /// Known invalid identifier to valid replacement; `None` means the modifier has no
    /// equivalent and should be removed.
    #[serde(default)]
    pub replacements: BTreeMap<String, Option<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TechnologyTable {
    pub valid: BTreeSet<String>,
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionWarning {
    pub path: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionMeta {
    /// Label of the scanned game directory.
    pub source: String,
    pub files_parsed: u32,
    pub files_skipped: u32,
    pub templates_read: u32,
    #[serde(default)]
    pub warnings: Vec<ExtractionWarning>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceDocument {
    pub schema: String,
    pub tool: ToolMeta,
    /// Ship type to its slots, in order of first appearance.
    pub ship_types: BTreeMap<String, Vec<String>>,
    pub entities: BTreeMap<String, EntityRecord>,
    pub modifiers: ModifierTable,
    pub technologies: TechnologyTable,
    pub extraction: ExtractionMeta,
}

impl Default for ReferenceDocument {
    fn default() -> Self {
        Self {
            schema: SCHEMA_REFERENCE_V1.to_string(),
            tool: ToolMeta::current("0.0.0"),
            ship_types: BTreeMap::new(),
            entities: BTreeMap::new(),
            modifiers: ModifierTable::default(),
            technologies: TechnologyTable::default(),
            extraction: ExtractionMeta::default(),
        }
    }
}

impl ReferenceDocument {
    pub fn slots(&self, ship_type: &str) -> Option<&[String]> {
        self.ship_types.get(ship_type).map(Vec::as_slice)
    }

    pub fn has_slot(&self, ship_type: &str, slot: &str) -> bool {
        self.slots(ship_type)
            .is_some_and(|slots| slots.iter().any(|s| s == slot))
    }

    pub fn entity(&self, name: &str) -> Option<&EntityRecord> {
        self.entities.get(name)
    }

    /// Entities valid in `ctx`, in name order.
    pub fn entities_in<'a>(
        &'a self,
        ctx: &'a SlotContext,
    ) -> impl Iterator<Item = (&'a str, &'a EntityRecord)> + 'a {
        self.entities
            .iter()
            .filter(move |(_, record)| record.is_valid_in(ctx))
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn is_valid_modifier(&self, name: &str) -> bool {
        self.modifiers.valid.contains(name)
    }

    /// Curated replacement for an invalid modifier: `Some(Some(x))` replace with `x`,
    /// `Some(None)` remove, `None` unknown.
    pub fn modifier_replacement(&self, name: &str) -> Option<Option<&str>> {
        self.modifiers
            .replacements
            .get(name)
            .map(|r| r.as_deref())
    }

    pub fn is_valid_technology(&self, name: &str) -> bool {
        self.technologies.valid.contains(name)
    }

    pub fn technology_replacement(&self, name: &str) -> Option<&str> {
        self.technologies.replacements.get(name).map(String::as_str)
    }
}
