//! Extraction over an installed game directory.

use crate::discover::discover_script_files;
use crate::parse;
use anyhow::Context;
use camino::Utf8Path;
use sectionguard_domain::ReferenceBuilder;
use sectionguard_domain::curated::CuratedTables;
use sectionguard_script::{Document, strip_bom};
use sectionguard_types::{ReferenceDocument, RepoPath, ToolMeta};

pub const SECTION_TEMPLATES_DIR: &str = "common/section_templates";
pub const COMPONENT_TEMPLATES_DIR: &str = "common/component_templates";
pub const TECHNOLOGY_DIR: &str = "common/technology";

/// Build the reference document from a game install.
///
/// `common/section_templates` must exist. Component templates and technologies are read
/// when present. A file that is not UTF-8 or does not parse is skipped with a warning.
pub fn extract_reference(
    game_dir: &Utf8Path,
    curated: CuratedTables,
    tool: ToolMeta,
) -> anyhow::Result<ReferenceDocument> {
    let sections_dir = game_dir.join(SECTION_TEMPLATES_DIR);
    if !sections_dir.is_dir() {
        anyhow::bail!(
            "{} not found under game directory {}",
            SECTION_TEMPLATES_DIR,
            game_dir
        );
    }

    let mut builder = ReferenceBuilder::new(game_dir.as_str(), curated);

    let section_files =
        discover_script_files(&sections_dir).context("discover section template files")?;
    for abs in &section_files {
        let path = RepoPath::relative_to(abs, game_dir);
        if let Some(doc) = read_document(&mut builder, abs, &path) {
            let templates = parse::section_templates(&path, &doc);
            tracing::debug!(path = %path, templates = templates.len(), "section templates read");
            builder.add_section_file(&templates);
        }
    }

    let components_dir = game_dir.join(COMPONENT_TEMPLATES_DIR);
    if components_dir.is_dir() {
        for abs in discover_script_files(&components_dir)
            .context("discover component template files")?
        {
            let path = RepoPath::relative_to(&abs, game_dir);
            if let Some(doc) = read_document(&mut builder, &abs, &path) {
                builder.add_modifier_file(parse::modifier_keys(&doc));
            }
        }
    }

    let technology_dir = game_dir.join(TECHNOLOGY_DIR);
    if technology_dir.is_dir() {
        for abs in discover_script_files(&technology_dir).context("discover technology files")? {
            let path = RepoPath::relative_to(&abs, game_dir);
            if let Some(doc) = read_document(&mut builder, &abs, &path) {
                builder.add_technology_file(parse::technology_keys(&doc));
            }
        }
    }

    let doc = builder.build(tool);
    tracing::info!(
        files_parsed = doc.extraction.files_parsed,
        files_skipped = doc.extraction.files_skipped,
        ship_types = doc.ship_types.len(),
        entities = doc.entities.len(),
        "extraction finished"
    );
    Ok(doc)
}

/// Read and parse one file, recording a skip on failure.
fn read_document(
    builder: &mut ReferenceBuilder,
    abs: &Utf8Path,
    path: &RepoPath,
) -> Option<Document> {
    let bytes = match std::fs::read(abs) {
        Ok(bytes) => bytes,
        Err(err) => {
            skip(builder, path, None, format!("cannot read file: {err}"));
            return None;
        }
    };
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            skip(builder, path, None, format!("not valid UTF-8: {err}"));
            return None;
        }
    };
    let (body, _) = strip_bom(&text);
    match sectionguard_script::parse(body) {
        Ok(doc) => Some(doc),
        Err(err) => {
            skip(builder, path, Some(err.line()), err.to_string());
            None
        }
    }
}

fn skip(builder: &mut ReferenceBuilder, path: &RepoPath, line: Option<u32>, message: String) {
    tracing::warn!(path = %path, line, "{message}; file skipped");
    builder.skip_file(path.clone(), line, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use sectionguard_types::SlotContext;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    const CRUISER: &str = r#"
ship_section_template = {
	key = "CRUISER_BOW_L1"
	ship_size = cruiser
	fits_on_slot = "bow"
	entity = "cruiser_bow_L1_entity"
	component_slot = { name = "LARGE_GUN_01" template = "large_turret" locatorname = "large_gun_01" }
}
ship_section_template = {
	key = "CRUISER_STERN"
	ship_size = cruiser
	fits_on_slot = stern
	entity = "cruiser_stern_entity"
	component_slot = { name = "PD_01" template = "point_defence_turret" locatorname = "point_defence_01" }
}
"#;

    fn tool() -> ToolMeta {
        ToolMeta::current("0.0.0")
    }

    #[test]
    fn extracts_entities_and_skips_broken_files() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(
            &root.join("common/section_templates/cruiser.txt"),
            CRUISER.as_bytes(),
        );
        write_file(
            &root.join("common/section_templates/broken.txt"),
            b"ship_section_template = {\n\tkey = \"X\"\n",
        );
        write_file(
            &root.join("common/section_templates/latin1.txt"),
            &[0x6b, 0x65, 0x79, 0x20, 0x3d, 0x20, 0xe9],
        );

        let doc = extract_reference(&root, CuratedTables::empty(), tool()).expect("extract");
        assert_eq!(
            doc.slots("cruiser"),
            Some(&["bow".to_string(), "stern".to_string()][..])
        );
        let stern = doc.entity("cruiser_stern_entity").expect("stern entity");
        assert!(stern.contexts.contains(&SlotContext::new("cruiser", "stern")));
        assert!(stern.locators.contains("point_defence_01"));

        assert_eq!(doc.extraction.files_parsed, 1);
        assert_eq!(doc.extraction.files_skipped, 2);
        let skipped: Vec<&str> = doc
            .extraction
            .warnings
            .iter()
            .map(|w| w.path.as_str())
            .collect();
        assert_eq!(
            skipped,
            vec![
                "common/section_templates/broken.txt",
                "common/section_templates/latin1.txt"
            ]
        );
        assert_eq!(doc.extraction.warnings[0].line, Some(1));
    }

    #[test]
    fn reads_component_modifiers_and_technologies() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(
            &root.join("common/section_templates/cruiser.txt"),
            CRUISER.as_bytes(),
        );
        write_file(
            &root.join("common/component_templates/armor.txt"),
            b"utility_component_template = { key = \"ARMOR\" modifier = { ship_armor_add = 100 } }\n",
        );
        write_file(
            &root.join("common/technology/weapons.txt"),
            "\u{feff}@cost = 10\ntech_lasers_1 = { cost = @cost }\n".as_bytes(),
        );

        let doc = extract_reference(&root, CuratedTables::empty(), tool()).expect("extract");
        assert!(doc.is_valid_modifier("ship_armor_add"));
        assert!(doc.is_valid_technology("tech_lasers_1"));
        assert!(!doc.is_valid_technology("@cost"));
        assert_eq!(doc.extraction.files_parsed, 3);
    }

    #[test]
    fn missing_section_templates_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = extract_reference(&root, CuratedTables::empty(), tool()).unwrap_err();
        assert!(err.to_string().contains("common/section_templates not found"));
    }
}
