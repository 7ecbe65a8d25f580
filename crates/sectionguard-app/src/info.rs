//! The `info` use case: slots and entities the reference document knows for a ship type.

use crate::config::resolve_config_text;
use crate::validate::load_reference;
use camino::Utf8Path;
use sectionguard_domain::balance::BalanceTable;
use sectionguard_settings::Overrides;
use sectionguard_types::{ReferenceDocument, SlotContext};

#[derive(Clone, Debug)]
pub struct InfoInput<'a> {
    pub reference_path: &'a Utf8Path,
    pub ship_type: &'a str,
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipInfo {
    pub ship_type: String,
    /// Points per auxiliary utility slot.
    pub aux_cost: u32,
    pub slots: Vec<SlotInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotInfo {
    pub slot: String,
    pub entities: Vec<EntityInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityInfo {
    pub name: String,
    pub locators: Vec<String>,
    pub component_templates: Vec<String>,
}

pub fn run_info(input: InfoInput<'_>) -> anyhow::Result<ShipInfo> {
    let resolved = resolve_config_text(input.config_text, input.overrides)?;
    let reference = load_reference(input.reference_path, &resolved)?;
    ship_info(&reference, input.ship_type, &resolved.effective.balance)
}

/// Slots in reference order, entities by name.
pub fn ship_info(
    reference: &ReferenceDocument,
    ship_type: &str,
    table: &BalanceTable,
) -> anyhow::Result<ShipInfo> {
    let Some(slots) = reference.slots(ship_type) else {
        let known: Vec<&str> = reference.ship_types.keys().map(String::as_str).collect();
        anyhow::bail!("unknown ship type: {ship_type} (known: {})", known.join(", "));
    };

    let slots = slots
        .iter()
        .map(|slot| {
            let ctx = SlotContext::new(ship_type, slot);
            let entities = reference
                .entities_in(&ctx)
                .map(|(name, record)| EntityInfo {
                    name: name.to_string(),
                    locators: record.locators.iter().cloned().collect(),
                    component_templates: record.component_templates.iter().cloned().collect(),
                })
                .collect();
            SlotInfo {
                slot: slot.clone(),
                entities,
            }
        })
        .collect();

    Ok(ShipInfo {
        ship_type: ship_type.to_string(),
        aux_cost: table.aux_cost(ship_type),
        slots,
    })
}

pub fn format_info(info: &ShipInfo) -> String {
    let mut out = format!("Ship type: {}\nAux cost: {}\n", info.ship_type, info.aux_cost);
    for slot in &info.slots {
        out.push_str(&format!("\n  Slot: {}\n", slot.slot));
        if slot.entities.is_empty() {
            out.push_str("    (no entities)\n");
        }
        for entity in &slot.entities {
            out.push_str(&format!("    Entity: {}\n", entity.name));
            out.push_str(&format!("      Locators: {}\n", list(&entity.locators)));
            out.push_str(&format!("      Templates: {}\n", list(&entity.component_templates)));
        }
    }
    out
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
