use crate::{RepoPath, ToolMeta};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_BALANCE_V1: &str = "sectionguard.balance.v1";

/// Score of one section template against the weapon-slot point budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BalanceEntry {
    pub template: String,
    pub path: RepoPath,
    pub line: u32,
    pub ship_type: String,
    pub slot: String,
    pub points: u32,
    pub tier: String,
    /// Tier encoded in the template key, when the key follows the tiered naming scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_tier: Option<String>,
    pub tier_mismatch: bool,
    /// Component templates with no point cost in the balance table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpriced_components: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BalanceReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub entries: Vec<BalanceEntry>,
    pub mismatches: u32,
}
