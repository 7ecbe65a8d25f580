use anyhow::Context;
use camino::Utf8Path;
use sectionguard_types::{ReferenceDocument, SCHEMA_REFERENCE_V1};

/// Load a persisted reference document.
pub fn read_reference(path: &Utf8Path) -> anyhow::Result<ReferenceDocument> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let doc: ReferenceDocument =
        serde_json::from_str(&text).with_context(|| format!("parse reference {}", path))?;
    if doc.schema != SCHEMA_REFERENCE_V1 {
        anyhow::bail!(
            "{} has schema '{}', expected '{}'; re-run `sectionguard extract`",
            path,
            doc.schema,
            SCHEMA_REFERENCE_V1
        );
    }
    Ok(doc)
}

/// Persist a reference document as pretty JSON, creating parent directories.
pub fn write_reference(path: &Utf8Path, doc: &ReferenceDocument) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
    }
    let mut text = serde_json::to_string_pretty(doc).context("serialize reference")?;
    text.push('\n');
    std::fs::write(path, text).with_context(|| format!("write {}", path))?;
    Ok(())
}
