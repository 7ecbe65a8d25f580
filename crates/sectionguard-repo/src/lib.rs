//! Repository adapters: discover script files, run extraction over a game install, load
//! mod templates, write fixed copies and persist the reference document.
//!
//! This crate is allowed to do filesystem IO. It should not spawn external processes.

#![forbid(unsafe_code)]

mod discover;
mod extract;
mod parse;
mod reference;
mod templates;

pub use discover::{SCRIPT_GLOB, discover_files, discover_script_files};
pub use extract::{COMPONENT_TEMPLATES_DIR, SECTION_TEMPLATES_DIR, TECHNOLOGY_DIR, extract_reference};
pub use parse::{SECTION_TEMPLATE_KEY, section_templates};
pub use reference::{read_reference, write_reference};
pub use templates::{
    SourceFile, WriteTarget, load_template_set, load_template_sources, template_set,
    write_fixed_files,
};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;
    use sectionguard_script::{TextEdit, apply_edits, strip_bom};
    use sectionguard_types::RepoPath;

    /// Parse arbitrary text as a section template file.
    ///
    /// Returns the number of templates found, `Err(...)` on invalid script.
    /// **Never panics** on any input.
    pub fn parse_section_file(text: &str) -> anyhow::Result<usize> {
        let (body, _) = strip_bom(text);
        let doc = sectionguard_script::parse(body)?;
        Ok(section_templates(&RepoPath::new("fuzz.txt"), &doc).len())
    }

    /// Parse arbitrary text as a technology file and return its technology keys.
    /// **Never panics** on any input.
    pub fn parse_technology_file(text: &str) -> anyhow::Result<Vec<String>> {
        let (body, _) = strip_bom(text);
        let doc = sectionguard_script::parse(body)?;
        Ok(parse::technology_keys(&doc))
    }

    /// Parse `text`, then delete every modifier and technology reference through span
    /// edits. Exercises the edit path on whatever spans the parser produced; the spans
    /// never nest, so the edits apply as they are.
    /// **Never panics** on any input.
    pub fn rewrite_section_file(text: &str) -> anyhow::Result<String> {
        let (body, _) = strip_bom(text);
        let doc = sectionguard_script::parse(body)?;
        let mut edits = Vec::new();
        for template in section_templates(&RepoPath::new("fuzz.txt"), &doc) {
            edits.extend(
                template
                    .modifiers
                    .iter()
                    .filter_map(|m| m.entry)
                    .map(TextEdit::delete),
            );
            edits.extend(
                template
                    .technologies
                    .iter()
                    .filter_map(|t| t.removal)
                    .map(TextEdit::delete),
            );
        }
        Ok(apply_edits(body, &edits)?)
    }
}

#[cfg(test)]
mod tests {
    use super::fuzz;
    use proptest::prelude::*;

    #[test]
    fn rewrite_removes_modifiers_and_techs() {
        let text = "ship_section_template = {\n\tkey = \"A\"\n\tmodifier = {\n\t\tship_armor_add = 5\n\t}\n\tprerequisites = { tech_a }\n}\n";
        let out = fuzz::rewrite_section_file(text).expect("rewrite");
        assert!(!out.contains("ship_armor_add"));
        assert!(!out.contains("tech_a"));
        assert!(out.contains("key = \"A\""));
    }

    #[test]
    fn technology_keys_through_fuzz_api() {
        let keys = fuzz::parse_technology_file("tech_a = { }\ntech_b = { }").expect("parse");
        assert_eq!(keys, vec!["tech_a", "tech_b"]);
    }

    proptest! {
        #[test]
        fn fuzz_apis_never_panic(text in ".{0,200}") {
            let _ = fuzz::parse_section_file(&text);
            let _ = fuzz::parse_technology_file(&text);
            let _ = fuzz::rewrite_section_file(&text);
        }

        #[test]
        fn rewrite_of_valid_template_still_parses(
            modifiers in prop::collection::vec("[a-z_]{1,12}", 0..4),
            techs in prop::collection::vec("tech_[a-z0-9_]{1,8}", 0..4),
        ) {
            let mut text = String::from("ship_section_template = {\n\tkey = \"T\"\n\tmodifier = {\n");
            for m in &modifiers {
                text.push_str(&format!("\t\t{m} = 1\n"));
            }
            text.push_str("\t}\n\tprerequisites = {");
            for t in &techs {
                text.push_str(&format!(" {t}"));
            }
            text.push_str(" }\n}\n");

            let out = fuzz::rewrite_section_file(&text).expect("rewrite");
            prop_assert_eq!(fuzz::parse_section_file(&out).expect("reparse"), 1);
        }
    }
}
