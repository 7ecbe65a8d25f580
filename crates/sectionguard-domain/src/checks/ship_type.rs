use super::CheckContext;
use super::utils::{ActiveCheck, IssueDraft, join_names};
use crate::model::SectionTemplate;
use sectionguard_types::{IssueCategory, ValidationIssue};
use serde_json::json;

/// Returns whether checking may continue past the ship type.
pub fn run(
    ctx: &CheckContext<'_>,
    check: Option<&ActiveCheck>,
    template: &SectionTemplate,
    out: &mut Vec<ValidationIssue>,
) -> bool {
    let ship_type = template.ship_type.value.as_str();
    if ctx.reference.slots(ship_type).is_some() {
        return true;
    }
    let Some(check) = check else {
        return false;
    };
    if check.allows(ship_type) {
        return false;
    }

    let message = if ship_type.is_empty() {
        format!("template '{}' has no ship_size", template.key)
    } else {
        format!(
            "template '{}' uses unknown ship type '{}'",
            template.key, ship_type
        )
    };
    out.push(
        IssueDraft {
            category: IssueCategory::InvalidShipType,
            severity: check.severity,
            template,
            identifier: ship_type,
            suggestion: None,
            message,
            line: template.ship_type.line(),
            data: json!({
                "ship_type": ship_type,
                "known_ship_types": join_names(ctx.reference.ship_types.keys().map(String::as_str)),
            }),
        }
        .into_issue(),
    );
    false
}
