use super::CheckContext;
use super::utils::{ActiveCheck, IssueDraft, join_names};
use crate::model::SectionTemplate;
use crate::slots::{ResolvedSlot, resolve_slot};
use sectionguard_types::{IssueCategory, ValidationIssue};
use serde_json::json;

pub fn run(
    ctx: &CheckContext<'_>,
    check: Option<&ActiveCheck>,
    template: &SectionTemplate,
    out: &mut Vec<ValidationIssue>,
) -> Option<ResolvedSlot> {
    let ship_type = template.ship_type.value.as_str();
    let raw = template.slot.value.as_str();
    if let Some(resolved) = resolve_slot(ctx.reference, ship_type, raw, ctx.slot_aliases) {
        return Some(resolved);
    }
    let check = check?;
    if check.allows(raw) {
        return None;
    }

    let valid = ctx.reference.slots(ship_type).unwrap_or_default();
    let valid_list = join_names(valid.iter().map(String::as_str));
    out.push(
        IssueDraft {
            category: IssueCategory::InvalidSlot,
            severity: check.severity,
            template,
            identifier: raw,
            suggestion: None,
            message: format!(
                "slot '{raw}' is not valid for ship type '{ship_type}' (valid: {valid_list})"
            ),
            line: template.slot.line(),
            data: json!({
                "ship_type": ship_type,
                "slot": raw,
                "valid_slots": valid,
            }),
        }
        .into_issue(),
    );
    None
}
