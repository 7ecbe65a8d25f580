use crate::model::{ComponentSlot, ModifierRef, SectionTemplate, Spanned, TechRef};
use sectionguard_types::{EntityRecord, ReferenceDocument, RepoPath, SlotContext};

/// Cruiser with bow/mid/stern slots and four entities.
///
/// - `cruiser_bow_L1_entity`: bow, locators large_gun_01 and large_gun_02
/// - `cruiser_mid_M2_entity`: mid, locators medium_gun_01 and medium_gun_02
/// - `cruiser_mid_L1_entity`: mid, locator large_gun_01
/// - `cruiser_stern_entity`: stern, locators small_gun_01 and point_defence_01
pub fn cruiser_reference() -> ReferenceDocument {
    let mut doc = ReferenceDocument::default();
    doc.ship_types.insert(
        "cruiser".to_string(),
        vec!["bow".to_string(), "mid".to_string(), "stern".to_string()],
    );
    add_entity(&mut doc, "cruiser_bow_L1_entity", "bow", &["large_gun_01", "large_gun_02"]);
    add_entity(&mut doc, "cruiser_mid_M2_entity", "mid", &["medium_gun_01", "medium_gun_02"]);
    add_entity(&mut doc, "cruiser_mid_L1_entity", "mid", &["large_gun_01"]);
    add_entity(&mut doc, "cruiser_stern_entity", "stern", &["small_gun_01", "point_defence_01"]);

    doc.modifiers.valid.insert("ship_weapon_damage".to_string());
    doc.modifiers.valid.insert("ship_armor_add".to_string());
    doc.modifiers.replacements.insert(
        "ship_weapon_damage_mult".to_string(),
        Some("ship_weapon_damage".to_string()),
    );
    doc.modifiers
        .replacements
        .insert("fleet_command_limit_add".to_string(), None);

    doc.technologies.valid.insert("tech_cruisers".to_string());
    doc.technologies
        .valid
        .insert("tech_mass_drivers_2".to_string());
    doc.technologies.replacements.insert(
        "tech_railguns_1".to_string(),
        "tech_mass_drivers_2".to_string(),
    );
    doc
}

pub fn add_entity(doc: &mut ReferenceDocument, name: &str, slot: &str, locators: &[&str]) {
    let mut record = EntityRecord::default();
    record.contexts.insert(SlotContext::new("cruiser", slot));
    record.locators = locators.iter().map(|l| l.to_string()).collect();
    doc.entities.insert(name.to_string(), record);
}

pub fn template(key: &str, ship_type: &str, slot: &str, entity: Option<&str>) -> SectionTemplate {
    let mut t = SectionTemplate::new(key, RepoPath::new("common/section_templates/mod.txt"), ship_type, slot);
    t.entity = entity.map(|e| Spanned::detached(e.to_string()));
    t
}

pub fn component(name: &str, template: &str, locator: &str) -> ComponentSlot {
    ComponentSlot {
        name: name.to_string(),
        template: template.to_string(),
        locator: Spanned::detached(locator.to_string()),
        entry: None,
    }
}

pub fn modifier(name: &str, value: &str) -> ModifierRef {
    ModifierRef {
        name: Spanned::detached(name.to_string()),
        value: value.to_string(),
        entry: None,
    }
}

pub fn tech(name: &str) -> TechRef {
    TechRef {
        name: Spanned::detached(name.to_string()),
        removal: None,
    }
}
