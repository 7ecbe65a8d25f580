use super::CheckContext;
use super::utils::{ActiveCheck, IssueDraft, join_names};
use crate::model::SectionTemplate;
use sectionguard_types::{EntityRecord, IssueCategory, SlotContext, ValidationIssue};
use serde_json::json;

pub enum Outcome<'a> {
    Stop,
    /// The entity record when it is known and valid in the context.
    Continue(Option<&'a EntityRecord>),
}

pub fn run<'a>(
    ctx: &CheckContext<'a>,
    context_check: &ActiveCheck,
    known_check: Option<&ActiveCheck>,
    template: &SectionTemplate,
    context: &SlotContext,
    out: &mut Vec<ValidationIssue>,
) -> Outcome<'a> {
    let Some(entity) = &template.entity else {
        return Outcome::Continue(None);
    };
    let name = entity.value.as_str();
    let reference = ctx.reference;

    match reference.entity(name) {
        Some(record) if record.is_valid_in(context) => Outcome::Continue(Some(record)),
        Some(record) => {
            let contexts: Vec<String> = record.contexts.iter().map(ToString::to_string).collect();
            let slot_as_written = template.slot.value.as_str();
            out.push(
                IssueDraft {
                    category: IssueCategory::WrongEntityContext,
                    severity: context_check.severity,
                    template,
                    identifier: name,
                    suggestion: None,
                    message: format!(
                        "entity '{name}' is not valid in {context}; it is defined for {}",
                        join_names(contexts.iter().map(String::as_str))
                    ),
                    line: entity.line(),
                    data: json!({
                        "entity": name,
                        "ship_type": context.ship_type,
                        "slot": context.slot,
                        "slot_as_written": slot_as_written,
                        "valid_contexts": contexts,
                    }),
                }
                .into_issue(),
            );
            Outcome::Stop
        }
        None => {
            if let Some(check) = known_check.filter(|c| !c.allows(name)) {
                out.push(
                    IssueDraft {
                        category: IssueCategory::UnknownEntity,
                        severity: check.severity,
                        template,
                        identifier: name,
                        suggestion: None,
                        message: format!("entity '{name}' does not exist in the reference data"),
                        line: entity.line(),
                        data: json!({
                            "entity": name,
                            "ship_type": context.ship_type,
                            "slot": context.slot,
                        }),
                    }
                    .into_issue(),
                );
            }
            Outcome::Continue(None)
        }
    }
}
