use camino::{Utf8Path, Utf8PathBuf};
use sectionguard_app::{
    ExtractInput, FixInput, ValidateInput, WriteTarget, run_extract, run_fix, run_validate,
};
use sectionguard_settings::Overrides;
use sectionguard_types::{Severity, Verdict, ids};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn fixtures_dir() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("tests")
        .join("fixtures")
}

struct Setup {
    _tmp: TempDir,
    root: Utf8PathBuf,
    reference: Utf8PathBuf,
}

fn extract_to_temp() -> Setup {
    let tmp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
    let output = run_extract(ExtractInput {
        game_dir: &fixtures_dir().join("game"),
        config_text: "",
        overrides: Overrides::default(),
    })
    .expect("extract");
    let reference = root.join("reference/vanilla_ship_data.json");
    sectionguard_repo::write_reference(&reference, &output.reference).expect("write reference");
    Setup {
        _tmp: tmp,
        root,
        reference,
    }
}

fn mod_root() -> Utf8PathBuf {
    fixtures_dir().join("mod")
}

fn codes_by_template(issues: &[sectionguard_types::ValidationIssue]) -> BTreeMap<&str, Vec<&str>> {
    let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for issue in issues {
        out.entry(issue.template.as_str())
            .or_default()
            .push(issue.code.as_str());
    }
    out
}

#[test]
fn validating_the_fixture_mod_reports_every_category() {
    let setup = extract_to_temp();
    let root = mod_root();
    let templates = root.join("src/common/section_templates");

    let output = run_validate(ValidateInput {
        mod_root: &root,
        templates_dir: &templates,
        reference_path: &setup.reference,
        config_text: "",
        overrides: Overrides::default(),
    })
    .expect("validate");
    let report = output.report;

    assert_eq!(report.verdict, Verdict::Fail);
    assert_eq!(report.data.templates_scanned, 6);
    assert_eq!(report.data.files_scanned, 2);
    assert_eq!(report.data.errors, 5);
    assert_eq!(report.data.warnings, 4);

    let by_template = codes_by_template(&report.issues);
    assert_eq!(by_template["MY_DESTROYER_BOW_COMMON_S2"], vec![ids::CODE_UNKNOWN_ENTITY]);
    assert_eq!(by_template["MY_CRUISER_STERN_S1"], vec![ids::CODE_WRONG_ENTITY_CONTEXT]);
    assert_eq!(by_template["MY_CRUISER_CORE_M2"], vec![ids::CODE_WRONG_ENTITY_CONTEXT]);
    assert_eq!(
        by_template["MY_CRUISER_BOW_ADVANCED_L2"],
        vec![
            ids::CODE_INVALID_LOCATOR,
            ids::CODE_INVALID_MODIFIER,
            ids::CODE_INVALID_MODIFIER,
            ids::CODE_INVALID_TECH,
        ]
    );
    assert_eq!(by_template["MY_TITAN_MID"], vec![ids::CODE_INVALID_SHIP_TYPE]);
    assert_eq!(by_template["MY_DESTROYER_KEEL"], vec![ids::CODE_INVALID_SLOT]);

    let first = &report.issues[0];
    assert_eq!(first.severity, Severity::Warning);
    let loc = first.location.as_ref().expect("location");
    assert_eq!(loc.path.as_str(), "src/common/section_templates/my_destroyers.txt");

    let damage = report
        .issues
        .iter()
        .find(|i| i.identifier == "ship_weapon_damage_mult")
        .expect("modifier issue");
    assert_eq!(damage.suggestion.as_deref(), Some("ship_weapon_damage"));
}

#[test]
fn fixing_into_an_out_dir_leaves_only_unfixable_issues() {
    let setup = extract_to_temp();
    let root = mod_root();
    let templates = root.join("src/common/section_templates");
    let out_dir = setup.root.join("fixed");

    let output = run_fix(FixInput {
        mod_root: &root,
        templates_dir: &templates,
        reference_path: &setup.reference,
        config_text: "",
        overrides: Overrides::default(),
        target: Some(WriteTarget::OutDir(out_dir.clone())),
    })
    .expect("fix");
    let report = output.report;

    assert_eq!(report.data.templates_changed, 4);
    assert_eq!(report.data.changes_total, 8);
    assert_eq!(report.data.unresolved_total, 2);
    assert!(!report.data.dry_run);
    assert_eq!(report.data.files_written.len(), 2);

    let rules: Vec<&str> = report.changes.iter().map(|c| c.rule.as_str()).collect();
    assert!(rules.contains(&ids::FIX_NORMALIZE_SLOT));
    assert!(rules.contains(&ids::FIX_EQUIVALENT_LOCATOR));
    assert!(rules.contains(&ids::FIX_REMOVE_MODIFIER));

    let sections = std::fs::read_to_string(out_dir.join("my_sections.txt")).expect("read fixed");
    assert!(sections.starts_with("# Custom sections for the overhaul mod\n"));
    assert!(sections.contains("entity = \"cruiser_stern_entity\""));
    assert!(sections.contains("fits_on_slot = mid"));
    assert!(sections.contains("locatorname = \"large_gun_02\""));
    assert!(sections.contains("ship_weapon_damage = 0.10"));
    assert!(!sections.contains("fleet_command_limit_add"));
    assert!(sections.contains("tech_mass_drivers_2"));

    let destroyers =
        std::fs::read_to_string(out_dir.join("my_destroyers.txt")).expect("read fixed");
    assert!(destroyers.starts_with('\u{feff}'));
    assert!(destroyers.contains("entity = \"destroyer_bow_S3_entity\""));

    // The fixed copy validates down to exactly the unresolved issues.
    let revalidated = run_validate(ValidateInput {
        mod_root: &setup.root,
        templates_dir: &out_dir,
        reference_path: &setup.reference,
        config_text: "",
        overrides: Overrides::default(),
    })
    .expect("revalidate");
    let codes: Vec<&str> = revalidated
        .report
        .issues
        .iter()
        .map(|i| i.code.as_str())
        .collect();
    assert_eq!(codes, vec![ids::CODE_INVALID_SHIP_TYPE, ids::CODE_INVALID_SLOT]);
}

#[test]
fn dry_run_writes_nothing() {
    let setup = extract_to_temp();
    let root = mod_root();
    let templates = root.join("src/common/section_templates");

    let output = run_fix(FixInput {
        mod_root: &root,
        templates_dir: &templates,
        reference_path: &setup.reference,
        config_text: "",
        overrides: Overrides::default(),
        target: None,
    })
    .expect("fix");
    assert!(output.report.data.dry_run);
    assert!(output.report.data.files_written.is_empty());
    assert_eq!(output.report.data.changes_total, 8);
}

#[test]
fn lenient_profile_turns_the_fixture_into_warnings_plus_context_errors() {
    let setup = extract_to_temp();
    let root = mod_root();
    let templates = root.join("src/common/section_templates");

    let output = run_validate(ValidateInput {
        mod_root: &root,
        templates_dir: &templates,
        reference_path: &setup.reference,
        config_text: "",
        overrides: Overrides {
            profile: Some("lenient".to_string()),
            ..Overrides::default()
        },
    })
    .expect("validate");

    let report = output.report;
    for issue in &report.issues {
        if issue.code == ids::CODE_WRONG_ENTITY_CONTEXT {
            assert_eq!(issue.severity, Severity::Error);
        } else {
            assert_eq!(issue.severity, Severity::Warning, "{}", issue.code);
        }
        assert_ne!(issue.code, ids::CODE_INVALID_MODIFIER);
        assert_ne!(issue.code, ids::CODE_INVALID_TECH);
    }
}

const REPLACED_MODIFIERS: &str = r#"ship_section_template = {
	key = "MY_CRUISER_BOW"
	ship_size = cruiser
	fits_on_slot = bow
	entity = "cruiser_bow_L1_entity"
	component_slot = { name = "A" template = "large_turret" locatorname = "large_gun_01" }
	modifier = {
		my_old_mod = 0.1
		my_cycle_a = 1
		ship_armor_add = 5
	}
	prerequisites = { "tech_cruisers" }
}
"#;

const REPLACEMENT_CONFIG: &str = r#"[curated]
modifier_replacements = { my_old_mod = "my_new_mod", my_cycle_a = "my_cycle_b", my_cycle_b = "my_cycle_a" }
"#;

#[test]
fn replacements_to_invalid_targets_are_removed_and_written_cleanly() {
    let setup = extract_to_temp();
    let templates = setup.root.join("mod/templates");
    std::fs::create_dir_all(&templates).expect("mkdir");
    std::fs::write(templates.join("a.txt"), REPLACED_MODIFIERS).expect("write template");
    let out_dir = setup.root.join("fixed");

    let output = run_fix(FixInput {
        mod_root: &setup.root,
        templates_dir: &templates,
        reference_path: &setup.reference,
        config_text: REPLACEMENT_CONFIG,
        overrides: Overrides::default(),
        target: Some(WriteTarget::OutDir(out_dir.clone())),
    })
    .expect("fix");
    let report = output.report;

    let rules: Vec<&str> = report.changes.iter().map(|c| c.rule.as_str()).collect();
    assert_eq!(rules, vec![ids::FIX_REMOVE_MODIFIER, ids::FIX_REMOVE_MODIFIER]);
    assert!(report.unresolved.is_empty());

    let fixed = std::fs::read_to_string(out_dir.join("a.txt")).expect("read fixed");
    assert!(!fixed.contains("my_old_mod"));
    assert!(!fixed.contains("my_cycle_a"));
    assert!(fixed.contains("\t\tship_armor_add = 5\n"));

    // Fixing the fixed copy again is a no-op.
    let again = run_fix(FixInput {
        mod_root: &setup.root,
        templates_dir: &out_dir,
        reference_path: &setup.reference,
        config_text: REPLACEMENT_CONFIG,
        overrides: Overrides::default(),
        target: None,
    })
    .expect("second fix");
    assert_eq!(again.report.data.changes_total, 0);
    assert_eq!(again.report.data.unresolved_total, 0);
}
