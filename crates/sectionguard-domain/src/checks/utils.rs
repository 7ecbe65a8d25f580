use crate::fingerprint::fingerprint_for_issue;
use crate::model::SectionTemplate;
use crate::policy::EffectiveConfig;
use globset::{Glob, GlobSet, GlobSetBuilder};
use sectionguard_types::{IssueCategory, Severity, ValidationIssue};
use serde_json::Value;

/// Allowlist entries are glob patterns (case-sensitive).
///
/// Patterns are validated by the settings crate; anything that still fails to compile
/// here is ignored rather than matched.
pub fn build_allowlist(allow: &[String]) -> Option<GlobSet> {
    if allow.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for glob in allow.iter().filter_map(|p| Glob::new(p).ok()) {
        builder.add(glob);
    }
    builder.build().ok()
}

pub fn is_allowed(allow: Option<&GlobSet>, value: &str) -> bool {
    allow.map(|set| set.is_match(value)).unwrap_or(false)
}

/// An enabled check with its allowlist compiled once per run.
#[derive(Clone, Debug)]
pub struct ActiveCheck {
    pub severity: Severity,
    allow: Option<GlobSet>,
}

impl ActiveCheck {
    pub fn from_config(cfg: &EffectiveConfig, category: IssueCategory) -> Option<Self> {
        let policy = cfg.check_policy(category.check_id())?;
        Some(Self {
            severity: policy.severity,
            allow: build_allowlist(&policy.allow),
        })
    }

    pub fn always(severity: Severity) -> Self {
        Self {
            severity,
            allow: None,
        }
    }

    pub fn allows(&self, identifier: &str) -> bool {
        is_allowed(self.allow.as_ref(), identifier)
    }
}

pub struct IssueDraft<'a> {
    pub category: IssueCategory,
    pub severity: Severity,
    pub template: &'a SectionTemplate,
    pub identifier: &'a str,
    pub suggestion: Option<String>,
    pub message: String,
    pub line: Option<u32>,
    pub data: Value,
}

impl IssueDraft<'_> {
    pub fn into_issue(self) -> ValidationIssue {
        let check_id = self.category.check_id();
        let code = self.category.code();
        let fingerprint = fingerprint_for_issue(
            check_id,
            code,
            self.template.path.as_str(),
            &self.template.key,
            self.identifier,
        );
        ValidationIssue {
            severity: self.severity,
            check_id: check_id.to_string(),
            code: code.to_string(),
            template: self.template.key.clone(),
            identifier: self.identifier.to_string(),
            help: Some(help_for(self.category, self.suggestion.as_deref())),
            suggestion: self.suggestion,
            message: self.message,
            location: Some(self.template.location(self.line)),
            fingerprint: Some(fingerprint),
            data: self.data,
        }
    }
}

fn help_for(category: IssueCategory, suggestion: Option<&str>) -> String {
    match (category, suggestion) {
        (IssueCategory::InvalidShipType, _) => {
            "Use a ship_size defined by the game (see the reference ship_types list).".to_string()
        }
        (IssueCategory::InvalidSlot, _) => {
            "Use one of the slots listed for this ship type, or add an alias under [slot_aliases].".to_string()
        }
        (IssueCategory::WrongEntityContext, _) => {
            "Pick an entity whose contexts include this ship type and slot. `sectionguard fix` can do this automatically.".to_string()
        }
        (IssueCategory::UnknownEntity, _) => {
            "Check the entity name for typos, or allowlist mod-provided entities under [checks.\"section.entity_known\"].".to_string()
        }
        (IssueCategory::InvalidLocator, _) => {
            "Bind the component slot to a locator the entity defines.".to_string()
        }
        (IssueCategory::InvalidModifier | IssueCategory::InvalidTech, Some(replacement)) => {
            format!("Replace it with `{replacement}`.")
        }
        (IssueCategory::InvalidModifier, None) => {
            "Remove the modifier or replace it with a valid ship modifier.".to_string()
        }
        (IssueCategory::InvalidTech, None) => {
            "Remove the prerequisite or replace it with a technology defined by the game.".to_string()
        }
    }
}

pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = names.into_iter().collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}
