//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use sectionguard_types::explain;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn contracts_fixtures_dir() -> PathBuf {
    project_root().join("contracts").join("fixtures")
}

/// Schema definition with its document id and target filename.
struct SchemaSpec {
    id: &'static str,
    generate: fn() -> schemars::Schema,
}

impl SchemaSpec {
    fn filename(&self) -> String {
        format!("{}.json", self.id)
    }
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            id: sectionguard_types::SCHEMA_VALIDATION_V1,
            generate: || schema_for!(sectionguard_types::ValidationReport),
        },
        SchemaSpec {
            id: sectionguard_types::SCHEMA_FIX_V1,
            generate: || schema_for!(sectionguard_types::FixReport),
        },
        SchemaSpec {
            id: sectionguard_types::SCHEMA_REFERENCE_V1,
            generate: || schema_for!(sectionguard_types::ReferenceDocument),
        },
        SchemaSpec {
            id: sectionguard_types::SCHEMA_BALANCE_V1,
            generate: || schema_for!(sectionguard_types::BalanceReport),
        },
        SchemaSpec {
            id: sectionguard_settings::SCHEMA_CONFIG_V1,
            generate: || schema_for!(sectionguard_settings::SectionguardConfigV1),
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename());
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename());
        let Ok(actual) = fs::read_to_string(&path) else {
            missing.push(spec.filename());
            continue;
        };
        if serialize_schema(&(spec.generate)())? != actual {
            mismatched.push(spec.filename());
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate contract fixtures against the generated schemas");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

/// Check that a path is clean: no absolute paths, no `../`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.split('/').any(|seg| seg == "..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Path and id hygiene for every issue-shaped object in `issues`.
fn check_issues(filename: &str, field: &str, issues: &[serde_json::Value], errors: &mut Vec<String>) {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    for (i, issue) in issues.iter().enumerate() {
        if let Some(path) = issue.pointer("/location/path").and_then(|v| v.as_str())
            && !is_clean_path(path)
        {
            errors.push(format!(
                "{}: {}[{}].location.path '{}' is not clean (no absolute, no ../, forward slashes only)",
                filename, field, i, path
            ));
        }
        if let Some(check_id) = issue.get("check_id").and_then(|v| v.as_str())
            && !check_ids.contains(&check_id)
        {
            errors.push(format!("{}: {}[{}] has unknown check_id '{}'", filename, field, i, check_id));
        }
        if let Some(code) = issue.get("code").and_then(|v| v.as_str())
            && !codes.contains(&code)
        {
            errors.push(format!("{}: {}[{}] has unknown code '{}'", filename, field, i, code));
        }
    }
}

/// Validate contract fixtures.
///
/// Each `contracts/fixtures/*.json` names its document type through `schema`. This checks:
/// 1. Schema validation against the schema generated from the Rust types
/// 2. Path hygiene of issue and change locations
/// 3. Every check_id and code is registered
fn conform() -> anyhow::Result<()> {
    let fixtures_dir = contracts_fixtures_dir();
    if !fixtures_dir.exists() {
        bail!("contracts/fixtures/ not found at {}", fixtures_dir.display());
    }

    let specs = schema_specs();
    let mut entries: Vec<PathBuf> = fs::read_dir(&fixtures_dir)
        .context("Failed to read contracts/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for path in entries {
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", filename))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", filename))?;

        let schema_id = value.get("schema").and_then(|v| v.as_str()).unwrap_or_default();
        let Some(spec) = specs.iter().find(|s| s.id == schema_id) else {
            errors.push(format!("{}: unknown schema '{}'", filename, schema_id));
            continue;
        };

        let schema_value =
            serde_json::to_value((spec.generate)()).context("Failed to serialize schema")?;
        let compiled = jsonschema::validator_for(&schema_value)
            .map_err(|e| anyhow::anyhow!("Failed to compile schema {}: {}", spec.id, e))?;
        for err in compiled.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", filename, err));
        }

        for field in ["issues", "unresolved"] {
            if let Some(issues) = value.get(field).and_then(|v| v.as_array()) {
                check_issues(&filename, field, issues, &mut errors);
            }
        }
        if let Some(changes) = value.get("changes").and_then(|v| v.as_array()) {
            for (i, change) in changes.iter().enumerate() {
                if let Some(p) = change.pointer("/location/path").and_then(|v| v.as_str())
                    && !is_clean_path(p)
                {
                    errors.push(format!("{}: changes[{}].location.path '{}' is not clean", filename, i, p));
                }
            }
        }

        fixture_count += 1;
        println!("  ✓ {} validates", filename);
    }

    if fixture_count == 0 {
        bail!("No JSON fixtures found in {}", fixtures_dir.display());
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} contract fixtures pass conformance checks!", fixture_count);
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, ids) in [("Check ID", check_ids), ("Code", codes)] {
        for id in ids {
            match explain::lookup_explanation(id) {
                Some(exp) => {
                    if exp.title.is_empty() {
                        errors.push(format!("{} '{}' has empty title", kind, id));
                    }
                    if exp.description.is_empty() {
                        errors.push(format!("{} '{}' has empty description", kind, id));
                    }
                    if exp.remediation.is_empty() {
                        errors.push(format!("{} '{}' has empty remediation", kind, id));
                    }
                }
                None => errors.push(format!("{} '{}' has no explanation", kind, id)),
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.id);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
