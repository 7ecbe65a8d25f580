//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Validation determinism
//! - Short-circuiting of structural issues
//! - Fixer idempotence and slot stability

use crate::engine::validate;
use crate::fixer::fix;
use crate::model::{SectionTemplate, TemplateSet};
use crate::policy::EffectiveConfig;
use crate::test_support::{component, cruiser_reference, modifier, tech, template};
use proptest::prelude::*;
use sectionguard_types::{RepoPath, Severity, ids};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_ship_type() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => Just("cruiser".to_string()),
        1 => Just("titan".to_string()),
    ]
}

fn arb_slot() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["bow", "mid", "stern", "core", "keel"]).prop_map(str::to_string)
}

fn arb_entity() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::sample::select(vec![
            "cruiser_bow_L1_entity",
            "cruiser_mid_M2_entity",
            "cruiser_mid_L1_entity",
            "cruiser_stern_entity",
            "my_mod_entity",
        ])
        .prop_map(str::to_string),
    )
}

fn arb_locators() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "large_gun_01",
            "large_gun_02",
            "medium_gun_01",
            "medium_gun_05",
            "small_gun_01",
            "point_defence_01",
            "xl_gun_01",
            "torpedo_01",
        ])
        .prop_map(str::to_string),
        0..4,
    )
}

fn arb_modifiers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "ship_weapon_damage",
            "ship_weapon_damage_mult",
            "fleet_command_limit_add",
            "made_up_modifier",
        ])
        .prop_map(str::to_string),
        0..3,
    )
}

fn arb_techs() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["tech_cruisers", "tech_railguns_1", "tech_unknown"])
            .prop_map(str::to_string),
        0..3,
    )
}

prop_compose! {
    fn arb_template()(
        ship in arb_ship_type(),
        slot in arb_slot(),
        entity in arb_entity(),
        locators in arb_locators(),
        modifiers in arb_modifiers(),
        techs in arb_techs(),
    ) -> SectionTemplate {
        let mut t = template("generated", &ship, &slot, entity.as_deref());
        for (i, locator) in locators.iter().enumerate() {
            t.component_slots.push(component(&format!("SLOT_{i:02}"), "large_turret", locator));
        }
        for m in &modifiers {
            t.modifiers.push(modifier(m, "1"));
        }
        for name in &techs {
            t.technologies.push(tech(name));
        }
        t
    }
}

fn set_of(templates: Vec<SectionTemplate>) -> TemplateSet {
    let templates = templates
        .into_iter()
        .enumerate()
        .map(|(i, mut t)| {
            t.key = format!("generated_{i}");
            t.line = i as u32 + 1;
            t
        })
        .collect();
    TemplateSet {
        files: vec![RepoPath::new("common/section_templates/mod.txt")],
        templates,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn validation_is_deterministic(templates in prop::collection::vec(arb_template(), 0..6)) {
        let set = set_of(templates);
        let reference = cruiser_reference();
        let cfg = EffectiveConfig::default();
        let a = validate(&reference, &set, &cfg);
        let b = validate(&reference, &set, &cfg);
        prop_assert_eq!(a.issues, b.issues);
        prop_assert_eq!(a.verdict, b.verdict);
    }

    #[test]
    fn structural_issue_is_the_only_issue(t in arb_template()) {
        let set = set_of(vec![t]);
        let report = validate(&cruiser_reference(), &set, &EffectiveConfig::default());
        let structural = report
            .issues
            .iter()
            .any(|i| i.category().is_some_and(|c| c.is_structural()));
        if structural {
            prop_assert_eq!(report.issues.len(), 1);
        }
    }

    #[test]
    fn wrong_context_is_always_an_error(t in arb_template()) {
        let set = set_of(vec![t]);
        let report = validate(&cruiser_reference(), &set, &EffectiveConfig::default());
        for issue in &report.issues {
            if issue.code == ids::CODE_WRONG_ENTITY_CONTEXT {
                prop_assert_eq!(issue.severity, Severity::Error);
            }
        }
    }

    #[test]
    fn fixing_twice_changes_nothing_the_second_time(
        templates in prop::collection::vec(arb_template(), 1..5)
    ) {
        let reference = cruiser_reference();
        let cfg = EffectiveConfig::default();
        let mut set = set_of(templates);
        let first = fix(&reference, &mut set, &cfg);
        let second = fix(&reference, &mut set, &cfg);
        prop_assert!(second.changes.is_empty());
        prop_assert_eq!(first.unresolved, second.unresolved);
    }

    #[test]
    fn fixer_leaves_no_fixable_issue_behind(t in arb_template()) {
        let reference = cruiser_reference();
        let cfg = EffectiveConfig::default();
        let mut set = set_of(vec![t]);
        let outcome = fix(&reference, &mut set, &cfg);
        let report = validate(&reference, &set, &cfg);
        prop_assert_eq!(report.issues, outcome.unresolved);
    }

    #[test]
    fn warning_only_templates_keep_ship_type_and_slot(t in arb_template()) {
        let reference = cruiser_reference();
        let cfg = EffectiveConfig::default();
        let before = set_of(vec![t]);
        let report = validate(&reference, &before, &cfg);
        prop_assume!(report.issues.iter().all(|i| i.severity == Severity::Warning));

        let mut after = before.clone();
        fix(&reference, &mut after, &cfg);
        prop_assert_eq!(&after.templates[0].ship_type, &before.templates[0].ship_type);
        prop_assert_eq!(&after.templates[0].slot, &before.templates[0].slot);
    }
}
