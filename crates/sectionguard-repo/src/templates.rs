//! Loading mod template files and writing fixed copies.

use crate::discover::discover_script_files;
use crate::parse;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use sectionguard_domain::model::TemplateSet;
use sectionguard_script::{BOM, TextEdit, apply_edits, strip_bom};
use sectionguard_types::RepoPath;
use std::collections::BTreeMap;

/// One template file as read from disk.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Path relative to the mod root, as used in reports.
    pub path: RepoPath,
    /// Path relative to the templates directory.
    pub relative: Utf8PathBuf,
    pub abs: Utf8PathBuf,
    /// Text without a leading byte order mark.
    pub text: String,
    pub bom: bool,
}

/// Read every `*.txt` file under `templates_dir`.
///
/// Unlike extraction, unreadable mod files are an error: fixing a partially read mod
/// would silently drop templates.
pub fn load_template_sources(
    mod_root: &Utf8Path,
    templates_dir: &Utf8Path,
) -> anyhow::Result<Vec<SourceFile>> {
    let files = discover_script_files(templates_dir).context("discover template files")?;
    let mut out = Vec::with_capacity(files.len());
    for abs in files {
        let raw = std::fs::read_to_string(&abs).with_context(|| format!("read {}", abs))?;
        let (body, bom) = strip_bom(&raw);
        let relative = abs
            .strip_prefix(templates_dir)
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|_| Utf8PathBuf::from(abs.file_name().unwrap_or(abs.as_str())));
        out.push(SourceFile {
            path: RepoPath::relative_to(&abs, mod_root),
            relative,
            text: body.to_string(),
            bom,
            abs,
        });
    }
    Ok(out)
}

/// Parse loaded sources into the template set the validator works on.
pub fn template_set(sources: &[SourceFile]) -> anyhow::Result<TemplateSet> {
    let mut set = TemplateSet::default();
    for source in sources {
        let doc = sectionguard_script::parse(&source.text)
            .with_context(|| format!("parse {}", source.path))?;
        let templates = parse::section_templates(&source.path, &doc);
        tracing::debug!(path = %source.path, templates = templates.len(), "templates loaded");
        set.files.push(source.path.clone());
        set.templates.extend(templates);
    }
    Ok(set)
}

/// Convenience for callers that only need the parsed templates.
pub fn load_template_set(
    mod_root: &Utf8Path,
    templates_dir: &Utf8Path,
) -> anyhow::Result<(Vec<SourceFile>, TemplateSet)> {
    let sources = load_template_sources(mod_root, templates_dir)?;
    let set = template_set(&sources)?;
    Ok((sources, set))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteTarget {
    /// Rewrite changed files where they are.
    InPlace,
    /// Write a full copy of the template directory, with fixes applied, under this directory.
    OutDir(Utf8PathBuf),
}

/// Apply per-file edits and write the result. Returns the files whose text changed.
pub fn write_fixed_files(
    sources: &[SourceFile],
    edits: &BTreeMap<RepoPath, Vec<TextEdit>>,
    target: &WriteTarget,
) -> anyhow::Result<Vec<RepoPath>> {
    let mut changed = Vec::new();
    for source in sources {
        let fixed = match edits.get(&source.path) {
            Some(file_edits) if !file_edits.is_empty() => apply_edits(&source.text, file_edits)
                .with_context(|| format!("apply fixes to {}", source.path))?,
            _ => source.text.clone(),
        };
        let is_changed = fixed != source.text;

        let dest = match target {
            WriteTarget::InPlace if !is_changed => continue,
            WriteTarget::InPlace => source.abs.clone(),
            WriteTarget::OutDir(dir) => dir.join(&source.relative),
        };
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
        }
        let mut contents = String::with_capacity(fixed.len() + BOM.len_utf8());
        if source.bom {
            contents.push(BOM);
        }
        contents.push_str(&fixed);
        std::fs::write(&dest, contents).with_context(|| format!("write {}", dest))?;

        if is_changed {
            tracing::info!(path = %source.path, dest = %dest, "fixed file written");
            changed.push(source.path.clone());
        }
    }
    Ok(changed)
}
