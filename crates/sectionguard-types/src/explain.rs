//! Explain registry for checks and codes.
//!
//! Maps check IDs and issue codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check looks at and what breaks when it fails.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after script snippets.
    pub examples: ExamplePair,
}

/// Before and after script snippets.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Script that would trigger an issue.
    pub before: &'static str,
    /// Script that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_SECTION_SHIP_TYPE | ids::CODE_INVALID_SHIP_TYPE => Some(explain_ship_type()),
        ids::CHECK_SECTION_SLOT | ids::CODE_INVALID_SLOT => Some(explain_slot()),
        ids::CHECK_SECTION_ENTITY_CONTEXT | ids::CODE_WRONG_ENTITY_CONTEXT => {
            Some(explain_entity_context())
        }
        ids::CHECK_SECTION_ENTITY_KNOWN | ids::CODE_UNKNOWN_ENTITY => Some(explain_entity_known()),
        ids::CHECK_SECTION_LOCATORS | ids::CODE_INVALID_LOCATOR => Some(explain_locators()),
        ids::CHECK_SECTION_MODIFIERS | ids::CODE_INVALID_MODIFIER => Some(explain_modifiers()),
        ids::CHECK_SECTION_TECHS | ids::CODE_INVALID_TECH => Some(explain_techs()),
        ids::CHECK_TOOL_RUNTIME | ids::CODE_RUNTIME_ERROR => Some(explain_runtime()),
        ids::CODE_TIER_MISMATCH => Some(explain_tier_mismatch()),
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_SECTION_SHIP_TYPE,
        ids::CHECK_SECTION_SLOT,
        ids::CHECK_SECTION_ENTITY_CONTEXT,
        ids::CHECK_SECTION_ENTITY_KNOWN,
        ids::CHECK_SECTION_LOCATORS,
        ids::CHECK_SECTION_MODIFIERS,
        ids::CHECK_SECTION_TECHS,
        ids::CHECK_TOOL_RUNTIME,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_INVALID_SHIP_TYPE,
        ids::CODE_INVALID_SLOT,
        ids::CODE_WRONG_ENTITY_CONTEXT,
        ids::CODE_UNKNOWN_ENTITY,
        ids::CODE_INVALID_LOCATOR,
        ids::CODE_INVALID_MODIFIER,
        ids::CODE_INVALID_TECH,
        ids::CODE_RUNTIME_ERROR,
        ids::CODE_TIER_MISMATCH,
    ]
}

fn explain_ship_type() -> Explanation {
    Explanation {
        title: "Invalid Ship Type",
        description: "\
Detects section templates whose `ship_size` names a ship type the game does not define.

The game silently drops sections for unknown ship sizes, so the design never shows up
in the ship designer. Every later check on the template is skipped because slots and
entities are only meaningful for a known ship type.",
        remediation: "\
Use one of the ship types listed in the reference document (`ship_types`).
Re-run `sectionguard extract` after a game update if a new ship type is missing.",
        examples: ExamplePair {
            before: r#"ship_section_template = {
	key = "PBSS_CRUISER_BOW_COMMON_L1"
	ship_size = cruiser_mk2
	fits_on_slot = bow
}"#,
            after: r#"ship_section_template = {
	key = "PBSS_CRUISER_BOW_COMMON_L1"
	ship_size = cruiser
	fits_on_slot = bow
}"#,
        },
    }
}

fn explain_slot() -> Explanation {
    Explanation {
        title: "Invalid Slot",
        description: "\
Detects `fits_on_slot` values that are not slots of the template's ship type.

Configured aliases are applied first: a slot written as an alias (for example `core`
for `mid`) is accepted when its target is a real slot. Anything else cannot be placed
on the hull and later checks on the template are skipped.",
        remediation: "\
Use a slot listed for the ship type in the reference document, or add an alias under
`[slot_aliases]` in sectionguard.toml when the mod uses a consistent synonym.",
        examples: ExamplePair {
            before: r#"ship_size = destroyer
fits_on_slot = middle"#,
            after: r#"ship_size = destroyer
fits_on_slot = mid"#,
        },
    }
}

fn explain_entity_context() -> Explanation {
    Explanation {
        title: "Entity Used Outside Its Context",
        description: "\
Detects templates whose entity exists but is never used by the game for this
(ship type, slot) pair.

This is the most severe category: the entity model lacks the attach points the hull
expects, which crashes the game or corrupts ship graphics. It cannot be disabled,
downgraded, or allowlisted.",
        remediation: "\
Pick an entity the reference document lists for this ship type and slot, ideally one
that exposes every locator the template uses. `sectionguard fix` does this
automatically when such an entity exists or a default entity is configured.",
        examples: ExamplePair {
            before: r#"ship_size = cruiser
fits_on_slot = stern
entity = "cruiser_bow_L1_entity""#,
            after: r#"ship_size = cruiser
fits_on_slot = stern
entity = "cruiser_stern_entity""#,
        },
    }
}

fn explain_entity_known() -> Explanation {
    Explanation {
        title: "Unknown Entity",
        description: "\
Detects entities that appear nowhere in the game's section templates.

The entity may come from another mod or a custom asset, so this is a warning. If the
entity does not exist at load time the section renders without a model. Locator
checks are skipped because the entity's attach points are unknown.",
        remediation: "\
Use an entity from the reference document, or allowlist custom entities with
`allow = [\"my_mod_*\"]` under `[checks.\"section.entity_known\"]`.",
        examples: ExamplePair {
            before: r#"entity = "cruiser_bow_custom_entity""#,
            after: r#"entity = "cruiser_bow_L1_entity""#,
        },
    }
}

fn explain_locators() -> Explanation {
    Explanation {
        title: "Invalid Locator",
        description: "\
Detects `component_slot` blocks whose `locatorname` is not exposed by the template's
entity.

Weapons bound to a missing locator are mounted at the model origin or not drawn at
all.",
        remediation: "\
Use a locator the entity exposes. `sectionguard fix` maps locators through the
equivalence table (for example `xl_gun` to `large_gun`) and drops component slots with
no equivalent.",
        examples: ExamplePair {
            before: r#"component_slot = {
	name = "LARGE_GUN_01"
	template = "large_turret"
	locatorname = "xl_gun_01"
}"#,
            after: r#"component_slot = {
	name = "LARGE_GUN_01"
	template = "large_turret"
	locatorname = "large_gun_01"
}"#,
        },
    }
}

fn explain_modifiers() -> Explanation {
    Explanation {
        title: "Invalid Modifier",
        description: "\
Detects modifier keys inside `modifier = { ... }` blocks that the game does not know.

Unknown modifiers are ignored by the game, so the section silently loses the bonus.
Several historical spellings have curated replacements which are reported as the
suggestion.",
        remediation: "\
Replace the modifier with the suggested identifier, or remove it. `sectionguard fix`
applies curated replacements and removes modifiers that have none.",
        examples: ExamplePair {
            before: r#"modifier = {
	ship_weapon_damage_mult = 0.10
}"#,
            after: r#"modifier = {
	ship_weapon_damage = 0.10
}"#,
        },
    }
}

fn explain_techs() -> Explanation {
    Explanation {
        title: "Invalid Technology",
        description: "\
Detects `tech_*` identifiers (usually in `prerequisites`) that the game does not define.

A prerequisite on a missing technology makes the section permanently unavailable.",
        remediation: "\
Use the suggested technology, or remove the reference. `sectionguard fix` applies
curated replacements (for example `tech_railguns_1` to `tech_mass_drivers_2`) and
removes references without one.",
        examples: ExamplePair {
            before: r#"prerequisites = { "tech_railguns_1" }"#,
            after: r#"prerequisites = { "tech_mass_drivers_2" }"#,
        },
    }
}

fn explain_runtime() -> Explanation {
    Explanation {
        title: "Tool Runtime Error",
        description: "\
The run could not finish: the reference document, a template file or the config could
not be read or parsed. The report carries a single issue with the error message and the
verdict is `fail`.",
        remediation: "\
Read the message for the file and line at fault. Regenerate the reference document with
`sectionguard extract` if it is missing or from an older tool version.",
        examples: ExamplePair {
            before: r#"ship_section_template = {
	key = "PBSS_CRUISER_BOW_COMMON_L1"
	ship_size = cruiser"#,
            after: r#"ship_section_template = {
	key = "PBSS_CRUISER_BOW_COMMON_L1"
	ship_size = cruiser
}"#,
        },
    }
}

fn explain_tier_mismatch() -> Explanation {
    Explanation {
        title: "Declared Tier Does Not Match Points",
        description: "\
Reported by `sectionguard analyze` when a template key names a tier (for example
`PBSS_CRUISER_BOW_ADVANCED_L2`) but the section's point total falls in another tier.
Players pick sections by the tier in their name, so a wrong tier misrepresents the
design's strength.",
        remediation: "\
Rename the key to the computed tier, or change the weapons and utilities until the
points fit the declared tier. `sectionguard fix --rename-tiers` (or
`[fixer] rename_tiers = true`) renames keys automatically.",
        examples: ExamplePair {
            before: r#"key = "PBSS_CRUISER_BOW_ADVANCED_L2""#,
            after: r#"key = "PBSS_CRUISER_BOW_COMMON_L2""#,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id_and_code() {
        for id in all_check_ids().iter().chain(all_codes()) {
            assert!(lookup_explanation(id).is_some(), "{id} should be in registry");
        }
    }

    #[test]
    fn check_id_and_code_share_an_explanation() {
        let by_check = lookup_explanation(ids::CHECK_SECTION_ENTITY_CONTEXT).expect("check");
        let by_code = lookup_explanation(ids::CODE_WRONG_ENTITY_CONTEXT).expect("code");
        assert_eq!(by_check.title, by_code.title);
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation("unknown_code").is_none());
    }
}
