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

    for tech in &template.technologies {
        let name = tech.name.value.as_str();
        if ctx.reference.is_valid_technology(name) || check.allows(name) {
            continue;
        }
        let replacement = ctx.reference.technology_replacement(name);
        let message = match replacement {
            Some(to) => format!("technology '{name}' does not exist; use '{to}'"),
            None => format!("technology '{name}' does not exist"),
        };
        out.push(
            IssueDraft {
                category: IssueCategory::InvalidTech,
                severity: check.severity,
                template,
                identifier: name,
                suggestion: replacement.map(str::to_string),
                message,
                line: tech.name.line(),
                data: json!({
                    "technology": name,
                    "action": if replacement.is_some() { "replace" } else { "remove" },
                }),
            }
            .into_issue(),
        );
    }
}
