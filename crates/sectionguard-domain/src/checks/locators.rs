use super::utils::{ActiveCheck, IssueDraft};
use crate::model::SectionTemplate;
use sectionguard_types::{EntityRecord, IssueCategory, ValidationIssue};
use serde_json::json;

pub fn run(
    check: Option<&ActiveCheck>,
    template: &SectionTemplate,
    record: &EntityRecord,
    out: &mut Vec<ValidationIssue>,
) {
    let Some(check) = check else {
        return;
    };
    let entity = template.entity_name().unwrap_or_default();

    for component in &template.component_slots {
        let locator = component.locator.value.as_str();
        if record.locators.contains(locator) || check.allows(locator) {
            continue;
        }
        out.push(
            IssueDraft {
                category: IssueCategory::InvalidLocator,
                severity: check.severity,
                template,
                identifier: locator,
                suggestion: None,
                message: format!(
                    "locator '{locator}' on component slot '{}' is not defined by entity '{entity}'",
                    component.name
                ),
                line: component.locator.line(),
                data: json!({
                    "entity": entity,
                    "locator": locator,
                    "component_slot": component.name,
                    "valid_locators": record.locators,
                }),
            }
            .into_issue(),
        );
    }
}
