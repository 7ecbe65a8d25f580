use super::CheckContext;
use super::utils::{ActiveCheck, IssueDraft};
use crate::model::SectionTemplate;
use sectionguard_types::{IssueCategory, ValidationIssue};
use serde_json::json;

pub fn run(
    ctx: &CheckContext<'_>,
    check: Option<&ActiveCheck>,
    template: &SectionTemplate,
    out: &mut Vec<ValidationIssue>,
) {
    let Some(check) = check else {
        return;
    };

    for modifier in &template.modifiers {
        let name = modifier.name.value.as_str();
        if ctx.reference.is_valid_modifier(name) || check.allows(name) {
            continue;
        }
        let replacement = ctx.reference.modifier_replacement(name);
        let (suggestion, action) = match replacement {
            Some(Some(to)) => (Some(to.to_string()), "replace"),
            Some(None) => (None, "remove"),
            None => (None, "none"),
        };
        let message = match replacement {
            Some(Some(to)) => format!("modifier '{name}' is not a valid ship modifier; use '{to}'"),
            Some(None) => format!("modifier '{name}' has no ship-level equivalent"),
            None => format!("modifier '{name}' is not a valid ship modifier"),
        };
        out.push(
            IssueDraft {
                category: IssueCategory::InvalidModifier,
                severity: check.severity,
                template,
                identifier: name,
                suggestion,
                message,
                line: modifier.name.line(),
                data: json!({
                    "modifier": name,
                    "value": modifier.value,
                    "action": action,
                }),
            }
            .into_issue(),
        );
    }
}
