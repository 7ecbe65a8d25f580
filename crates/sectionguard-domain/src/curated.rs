//! Hand-maintained identifier tables.
//!
//! Invalid forms never appear in freshly extracted game data (they are historical or
//! misspelled identifiers seen in mod content), so replacements are curated here rather
//! than derived.

use sectionguard_types::ReferenceDocument;
use std::collections::{BTreeMap, BTreeSet};

const VALID_SHIP_MODIFIERS: &[&str] = &[
    "ship_weapon_damage",
    "ship_weapon_range_mult",
    "ship_fire_rate_mult",
    "ship_accuracy_add",
    "ship_tracking_add",
    "ship_hull_add",
    "ship_hull_mult",
    "ship_armor_add",
    "ship_armor_mult",
    "ship_shield_add",
    "ship_shield_mult",
    "ship_evasion_add",
    "ship_evasion_mult",
    "ship_speed_mult",
    "ship_hull_regen_add_perc",
    "ship_armor_regen_add_perc",
    "ship_shield_regen_add_perc",
    "ship_sensor_range_add",
    "ship_hyperlane_range_add",
    "ship_repair_hull_mult",
    "ship_repair_armor_mult",
];

const MODIFIER_REPLACEMENTS: &[(&str, Option<&str>)] = &[
    ("ship_weapon_damage_mult", Some("ship_weapon_damage")),
    ("fleet_command_limit_add", None),
    ("ship_repair_mult", Some("ship_repair_hull_mult")),
    ("sensor_range_mult", Some("ship_sensor_range_add")),
];

const COMMON_PREREQUISITES: &[&str] = &[
    "tech_corvettes",
    "tech_destroyers",
    "tech_cruisers",
    "tech_battleships",
    "tech_titans",
    "tech_colossus",
    "tech_juggernaut",
    "tech_lasers_1",
    "tech_lasers_2",
    "tech_lasers_3",
    "tech_mass_drivers_1",
    "tech_mass_drivers_2",
    "tech_mass_drivers_3",
    "tech_mass_drivers_4",
    "tech_mass_drivers_5",
    "tech_torpedoes_1",
    "tech_torpedoes_2",
    "tech_torpedoes_3",
    "tech_energy_torpedoes_1",
    "tech_energy_torpedoes_2",
    "tech_strike_craft_1",
    "tech_strike_craft_2",
    "tech_strike_craft_3",
    "tech_plasma_1",
    "tech_plasma_2",
    "tech_plasma_3",
    "tech_disruptors_1",
    "tech_disruptors_2",
    "tech_disruptors_3",
    "tech_nanocomposite_materials",
    "tech_bio_reactor",
    "tech_hive_node",
];

const TECH_REPLACEMENTS: &[(&str, &str)] = &[
    ("tech_railguns_1", "tech_mass_drivers_2"),
    ("tech_railguns_2", "tech_mass_drivers_3"),
    ("tech_railguns_3", "tech_mass_drivers_4"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CuratedTables {
    pub valid_modifiers: BTreeSet<String>,
    /// `None` = remove the modifier.
    pub modifier_replacements: BTreeMap<String, Option<String>>,
    pub valid_technologies: BTreeSet<String>,
    pub technology_replacements: BTreeMap<String, String>,
}

impl Default for CuratedTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CuratedTables {
    pub fn builtin() -> Self {
        Self {
            valid_modifiers: VALID_SHIP_MODIFIERS.iter().map(|s| s.to_string()).collect(),
            modifier_replacements: MODIFIER_REPLACEMENTS
                .iter()
                .map(|(from, to)| (from.to_string(), to.map(str::to_string)))
                .collect(),
            valid_technologies: COMMON_PREREQUISITES.iter().map(|s| s.to_string()).collect(),
            technology_replacements: TECH_REPLACEMENTS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Empty tables; extraction then relies on game data alone.
    pub fn empty() -> Self {
        Self {
            valid_modifiers: BTreeSet::new(),
            modifier_replacements: BTreeMap::new(),
            valid_technologies: BTreeSet::new(),
            technology_replacements: BTreeMap::new(),
        }
    }

    /// Overlay these tables on an already extracted document, so identifiers configured
    /// after extraction take effect without re-extracting.
    ///
    /// Replacement entries never shadow an identifier the document treats as valid.
    pub fn apply_to(&self, doc: &mut ReferenceDocument) {
        doc.modifiers
            .valid
            .extend(self.valid_modifiers.iter().cloned());
        doc.technologies
            .valid
            .extend(self.valid_technologies.iter().cloned());
        for (from, to) in &self.modifier_replacements {
            if !doc.modifiers.valid.contains(from) {
                doc.modifiers.replacements.insert(from.clone(), to.clone());
            }
        }
        for (from, to) in &self.technology_replacements {
            if !doc.technologies.valid.contains(from) {
                doc.technologies
                    .replacements
                    .insert(from.clone(), to.clone());
            }
        }
        doc.modifiers
            .replacements
            .retain(|from, _| !doc.modifiers.valid.contains(from));
        doc.technologies
            .replacements
            .retain(|from, _| !doc.technologies.valid.contains(from));
    }
}
