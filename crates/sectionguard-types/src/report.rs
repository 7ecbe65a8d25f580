use crate::{RepoPath, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Stable schema identifiers for sectionguard reports.
pub const SCHEMA_VALIDATION_V1: &str = "sectionguard.validation.v1";
pub const SCHEMA_FIX_V1: &str = "sectionguard.fix.v1";

/// Two levels only: errors break the game at load time, warnings are best-effort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Fixed enumeration of issue categories, in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    InvalidShipType,
    InvalidSlot,
    WrongEntityContext,
    UnknownEntity,
    InvalidLocator,
    InvalidModifier,
    InvalidTech,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::InvalidShipType,
        IssueCategory::InvalidSlot,
        IssueCategory::WrongEntityContext,
        IssueCategory::UnknownEntity,
        IssueCategory::InvalidLocator,
        IssueCategory::InvalidModifier,
        IssueCategory::InvalidTech,
    ];

    pub fn code(self) -> &'static str {
        match self {
            IssueCategory::InvalidShipType => ids::CODE_INVALID_SHIP_TYPE,
            IssueCategory::InvalidSlot => ids::CODE_INVALID_SLOT,
            IssueCategory::WrongEntityContext => ids::CODE_WRONG_ENTITY_CONTEXT,
            IssueCategory::UnknownEntity => ids::CODE_UNKNOWN_ENTITY,
            IssueCategory::InvalidLocator => ids::CODE_INVALID_LOCATOR,
            IssueCategory::InvalidModifier => ids::CODE_INVALID_MODIFIER,
            IssueCategory::InvalidTech => ids::CODE_INVALID_TECH,
        }
    }

    pub fn check_id(self) -> &'static str {
        match self {
            IssueCategory::InvalidShipType => ids::CHECK_SECTION_SHIP_TYPE,
            IssueCategory::InvalidSlot => ids::CHECK_SECTION_SLOT,
            IssueCategory::WrongEntityContext => ids::CHECK_SECTION_ENTITY_CONTEXT,
            IssueCategory::UnknownEntity => ids::CHECK_SECTION_ENTITY_KNOWN,
            IssueCategory::InvalidLocator => ids::CHECK_SECTION_LOCATORS,
            IssueCategory::InvalidModifier => ids::CHECK_SECTION_MODIFIERS,
            IssueCategory::InvalidTech => ids::CHECK_SECTION_TECHS,
        }
    }

    /// Severity before any profile or config adjustment.
    pub fn default_severity(self) -> Severity {
        match self {
            IssueCategory::InvalidShipType
            | IssueCategory::InvalidSlot
            | IssueCategory::WrongEntityContext
            | IssueCategory::InvalidLocator => Severity::Error,
            IssueCategory::UnknownEntity
            | IssueCategory::InvalidModifier
            | IssueCategory::InvalidTech => Severity::Warning,
        }
    }

    /// Structural categories stop every later check on the same template.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            IssueCategory::InvalidShipType
                | IssueCategory::InvalidSlot
                | IssueCategory::WrongEntityContext
        )
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn from_check_id(check_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.check_id() == check_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub path: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub check_id: String,
    /// Issue category code (`invalid_slot`, `wrong_entity_context`, ...).
    pub code: String,
    /// Key of the section template the issue belongs to; empty for tool-level issues.
    #[serde(default)]
    pub template: String,
    /// The offending identifier as written in the template.
    #[serde(default)]
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Hash of check_id, code, path, template key, and identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

impl ValidationIssue {
    pub fn category(&self) -> Option<IssueCategory> {
        IssueCategory::from_code(&self.code)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

impl ToolMeta {
    pub fn current(version: &str) -> Self {
        Self {
            name: "sectionguard".to_string(),
            version: version.to_string(),
        }
    }
}

/// Summary payload of a validation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ValidationData {
    pub profile: String,

    pub files_scanned: u32,
    pub templates_scanned: u32,

    pub issues_total: u32,
    pub issues_emitted: u32,
    pub errors: u32,
    pub warnings: u32,

    /// Issue counts keyed by category code, before truncation.
    #[serde(default)]
    pub by_category: BTreeMap<String, u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub issues: Vec<ValidationIssue>,
    pub data: ValidationData,
}

/// One applied edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FixChange {
    /// Fixer rule that produced the change (`fix.alternative_entity`, ...).
    pub rule: String,
    /// Category of the issue the change resolves.
    pub code: String,
    pub template: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct FixData {
    pub profile: String,
    pub files_scanned: u32,
    pub templates_scanned: u32,
    pub templates_changed: u32,
    pub changes_total: u32,
    pub unresolved_total: u32,
    pub dry_run: bool,
    /// Source files whose fixed text was written.
    #[serde(default)]
    pub files_written: Vec<RepoPath>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FixReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub changes: Vec<FixChange>,
    /// Issues no fixer rule could resolve; they need manual attention.
    pub unresolved: Vec<ValidationIssue>,
    pub data: FixData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip() {
        for category in IssueCategory::ALL {
            assert_eq!(IssueCategory::from_code(category.code()), Some(category));
            assert_eq!(IssueCategory::from_check_id(category.check_id()), Some(category));
        }
        assert_eq!(IssueCategory::from_code("nope"), None);
    }

    #[test]
    fn entity_context_is_structural_error() {
        let c = IssueCategory::WrongEntityContext;
        assert!(c.is_structural());
        assert_eq!(c.default_severity(), Severity::Error);
        assert!(!IssueCategory::UnknownEntity.is_structural());
        assert_eq!(
            IssueCategory::UnknownEntity.default_severity(),
            Severity::Warning
        );
    }

    #[test]
    fn severity_orders_warning_below_error() {
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(
            serde_json::to_value(Severity::Warning).expect("serialize"),
            serde_json::json!("warning")
        );
    }
}
