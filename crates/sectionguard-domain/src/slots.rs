use sectionguard_types::ReferenceDocument;
use std::collections::BTreeMap;

/// A slot name resolved against the ship type's slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub slot: String,
    /// The alias as written, when the slot was reached through one.
    pub alias: Option<String>,
}

/// Resolve `raw` for `ship_type`: the slot itself when it exists, otherwise its alias
/// target when that exists. An alias never shadows a real slot.
pub fn resolve_slot(
    reference: &ReferenceDocument,
    ship_type: &str,
    raw: &str,
    aliases: &BTreeMap<String, String>,
) -> Option<ResolvedSlot> {
    if reference.has_slot(ship_type, raw) {
        return Some(ResolvedSlot {
            slot: raw.to_string(),
            alias: None,
        });
    }
    let target = aliases.get(raw)?;
    reference
        .has_slot(ship_type, target)
        .then(|| ResolvedSlot {
            slot: target.clone(),
            alias: Some(raw.to_string()),
        })
}
