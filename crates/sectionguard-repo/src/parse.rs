//! Mapping parsed script documents onto the domain model.

use sectionguard_domain::model::{
    ComponentSlot, ModifierRef, SectionTemplate, Spanned, TechRef, UtilitySlots,
};
use sectionguard_script::{Block, Document, Item, Scalar, Value};
use sectionguard_types::RepoPath;

pub const SECTION_TEMPLATE_KEY: &str = "ship_section_template";
const DEFAULT_SLOT: &str = "mid";
const TECH_PREFIX: &str = "tech_";

/// Every top-level `ship_section_template = { ... }` block of a file.
pub fn section_templates(path: &RepoPath, doc: &Document) -> Vec<SectionTemplate> {
    doc.get_all(SECTION_TEMPLATE_KEY)
        .filter_map(|entry| {
            let block = entry.value.as_block()?;
            Some(section_template(path, entry.span.line, block))
        })
        .collect()
}

fn spanned(scalar: &Scalar) -> Spanned<String> {
    Spanned::new(scalar.text.clone(), scalar.span)
}

fn section_template(path: &RepoPath, line: u32, block: &Block) -> SectionTemplate {
    let key_scalar = block.scalar("key");
    let key = key_scalar
        .map(|s| s.text.clone())
        .unwrap_or_else(|| format!("{}:{}", path, line));

    let ship_type = block
        .scalar("ship_size")
        .map(spanned)
        .unwrap_or_else(|| Spanned::detached(String::new()));
    let slot = block
        .scalar("fits_on_slot")
        .map(spanned)
        .unwrap_or_else(|| Spanned::detached(DEFAULT_SLOT.to_string()));
    let entity = block.scalar("entity").map(spanned);

    let component_slots = block
        .get_all("component_slot")
        .filter_map(|entry| {
            let slot = entry.value.as_block()?;
            let locator = slot.scalar("locatorname")?;
            Some(ComponentSlot {
                name: slot.scalar("name").map(|s| s.text.clone()).unwrap_or_default(),
                template: slot
                    .scalar("template")
                    .map(|s| s.text.clone())
                    .unwrap_or_default(),
                locator: spanned(locator),
                entry: Some(entry.span),
            })
        })
        .collect();

    let modifiers = block
        .get_all("modifier")
        .filter_map(|entry| entry.value.as_block())
        .flat_map(|modifier| modifier.entries())
        .map(|entry| ModifierRef {
            name: spanned(&entry.key),
            value: match &entry.value {
                Value::Scalar(s) => s.text.clone(),
                Value::Block(_) => "{ ... }".to_string(),
            },
            entry: Some(entry.span),
        })
        .collect();

    let mut technologies = Vec::new();
    collect_technologies(block, &mut technologies);

    let utility_slots = UtilitySlots {
        large: count(block, "large_utility_slots"),
        small: count(block, "small_utility_slots"),
        aux: count(block, "aux_utility_slots"),
    };

    SectionTemplate {
        key,
        key_span: key_scalar.map(|s| s.span),
        path: path.clone(),
        line,
        ship_type,
        slot,
        entity,
        component_slots,
        modifiers,
        technologies,
        utility_slots,
    }
}

fn count(block: &Block, key: &str) -> u32 {
    block
        .scalar(key)
        .and_then(|s| s.text.parse().ok())
        .unwrap_or(0)
}

/// Blocks whose removal is owned by another fixer rule; technologies inside them would
/// nest one edit within another.
const NON_TECH_BLOCKS: &[&str] = &["component_slot", "modifier"];

/// `tech_*` values at any depth outside component slots and modifiers. An entry value
/// is dropped with its entry, a list item on its own.
fn collect_technologies(block: &Block, out: &mut Vec<TechRef>) {
    for item in &block.items {
        match item {
            Item::Entry(entry) => match &entry.value {
                Value::Scalar(s) if s.text.starts_with(TECH_PREFIX) => out.push(TechRef {
                    name: spanned(s),
                    removal: Some(entry.span),
                }),
                Value::Scalar(_) => {}
                Value::Block(_) if NON_TECH_BLOCKS.contains(&entry.key.text.as_str()) => {}
                Value::Block(inner) => collect_technologies(inner, out),
            },
            Item::Value(Value::Scalar(s)) if s.text.starts_with(TECH_PREFIX) => {
                out.push(TechRef {
                    name: spanned(s),
                    removal: Some(s.raw),
                })
            }
            Item::Value(Value::Scalar(_)) => {}
            Item::Value(Value::Block(inner)) => collect_technologies(inner, out),
        }
    }
}

/// Keys of every `modifier = { ... }` block at any depth.
pub fn modifier_keys(doc: &Document) -> Vec<String> {
    let mut out = Vec::new();
    collect_modifier_keys(doc, &mut out);
    out
}

fn collect_modifier_keys(block: &Block, out: &mut Vec<String>) {
    for entry in block.entries() {
        let Some(inner) = entry.value.as_block() else {
            continue;
        };
        if entry.key.text == "modifier" {
            out.extend(inner.entries().map(|e| e.key.text.clone()));
        } else {
            collect_modifier_keys(inner, out);
        }
    }
}

/// Top-level block keys of a technology file. `@variables` are skipped.
pub fn technology_keys(doc: &Document) -> Vec<String> {
    doc.entries()
        .filter(|e| e.value.as_block().is_some() && !e.key.text.starts_with('@'))
        .map(|e| e.key.text.clone())
        .collect()
}
