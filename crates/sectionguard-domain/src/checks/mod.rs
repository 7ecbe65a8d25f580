//! Per-template checks.
//!
//! Checks run in a fixed order and the first three are structural: once one of them
//! fails the rest of the template is not looked at, because every later check depends
//! on a valid (ship type, slot, entity) triple.

use crate::model::SectionTemplate;
use crate::policy::EffectiveConfig;
use sectionguard_types::{
    EntityRecord, IssueCategory, ReferenceDocument, Severity, SlotContext, ValidationIssue,
};
use std::collections::BTreeMap;

mod entity;
mod locators;
mod modifiers;
mod ship_type;
mod slot;
mod techs;
mod utils;

pub use utils::ActiveCheck;

/// Reference data plus the compiled per-check policy of one run.
pub struct CheckContext<'a> {
    pub reference: &'a ReferenceDocument,
    pub slot_aliases: &'a BTreeMap<String, String>,
    ship_type: Option<ActiveCheck>,
    slot: Option<ActiveCheck>,
    entity_context: ActiveCheck,
    entity_known: Option<ActiveCheck>,
    locators: Option<ActiveCheck>,
    modifiers: Option<ActiveCheck>,
    techs: Option<ActiveCheck>,
}

impl<'a> CheckContext<'a> {
    pub fn new(reference: &'a ReferenceDocument, cfg: &'a EffectiveConfig) -> Self {
        Self {
            reference,
            slot_aliases: &cfg.slot_aliases,
            ship_type: ActiveCheck::from_config(cfg, IssueCategory::InvalidShipType),
            slot: ActiveCheck::from_config(cfg, IssueCategory::InvalidSlot),
            // Not configurable: a wrong-context entity crashes the game.
            entity_context: ActiveCheck::always(Severity::Error),
            entity_known: ActiveCheck::from_config(cfg, IssueCategory::UnknownEntity),
            locators: ActiveCheck::from_config(cfg, IssueCategory::InvalidLocator),
            modifiers: ActiveCheck::from_config(cfg, IssueCategory::InvalidModifier),
            techs: ActiveCheck::from_config(cfg, IssueCategory::InvalidTech),
        }
    }
}

/// Where the structural checks left a template.
pub enum Resolution<'a> {
    /// A structural check failed (or could not be evaluated); nothing else applies.
    Stopped,
    Resolved {
        context: SlotContext,
        /// The slot as written when it matched only through an alias.
        alias: Option<String>,
        /// `None` when the template names no entity or the entity is unknown.
        entity: Option<&'a EntityRecord>,
    },
}

/// Run every check on one template, appending issues in check order.
pub fn check_template<'a>(
    ctx: &CheckContext<'a>,
    template: &SectionTemplate,
    out: &mut Vec<ValidationIssue>,
) -> Resolution<'a> {
    let resolution = resolve(ctx, template, out);
    if let Resolution::Resolved { entity, .. } = &resolution {
        if let Some(record) = entity {
            locators::run(ctx.locators.as_ref(), template, record, out);
        }
        modifiers::run(ctx, ctx.modifiers.as_ref(), template, out);
        techs::run(ctx, ctx.techs.as_ref(), template, out);
    }
    resolution
}

fn resolve<'a>(
    ctx: &CheckContext<'a>,
    template: &SectionTemplate,
    out: &mut Vec<ValidationIssue>,
) -> Resolution<'a> {
    if !ship_type::run(ctx, ctx.ship_type.as_ref(), template, out) {
        return Resolution::Stopped;
    }
    let Some(resolved) = slot::run(ctx, ctx.slot.as_ref(), template, out) else {
        return Resolution::Stopped;
    };
    let context = SlotContext::new(template.ship_type.value.as_str(), resolved.slot);

    match entity::run(
        ctx,
        &ctx.entity_context,
        ctx.entity_known.as_ref(),
        template,
        &context,
        out,
    ) {
        entity::Outcome::Stop => Resolution::Stopped,
        entity::Outcome::Continue(entity) => Resolution::Resolved {
            context,
            alias: resolved.alias,
            entity,
        },
    }
}

pub fn check_all(ctx: &CheckContext<'_>, templates: &[&SectionTemplate]) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    for template in templates {
        check_template(ctx, template, &mut out);
    }
    out
}
