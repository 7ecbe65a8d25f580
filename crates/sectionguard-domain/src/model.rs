use sectionguard_script::Span;
use sectionguard_types::{Location, RepoPath};
use std::collections::BTreeSet;

/// A value plus the span of its text in the source file.
///
/// `span` is `None` for values that were defaulted rather than written (a missing
/// `fits_on_slot`, templates built in memory).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Option<Span>,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self {
            value,
            span: Some(span),
        }
    }

    pub fn detached(value: T) -> Self {
        Self { value, span: None }
    }

    pub fn line(&self) -> Option<u32> {
        self.span.map(|s| s.line)
    }
}

/// `component_slot = { name template locatorname }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSlot {
    pub name: String,
    pub template: String,
    pub locator: Spanned<String>,
    /// The whole `component_slot = { ... }` entry.
    pub entry: Option<Span>,
}

/// A key inside a `modifier = { ... }` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifierRef {
    pub name: Spanned<String>,
    pub value: String,
    pub entry: Option<Span>,
}

/// A `tech_*` identifier anywhere in the template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TechRef {
    pub name: Spanned<String>,
    /// What to delete to drop the reference: the list item or the whole entry.
    pub removal: Option<Span>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UtilitySlots {
    pub large: u32,
    pub small: u32,
    pub aux: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionTemplate {
    pub key: String,
    /// Span of the `key` value; `None` when the key was generated.
    pub key_span: Option<Span>,
    pub path: RepoPath,
    /// Line of the `ship_section_template` entry.
    pub line: u32,
    /// Empty when `ship_size` is missing.
    pub ship_type: Spanned<String>,
    /// Defaults to `mid` when `fits_on_slot` is missing.
    pub slot: Spanned<String>,
    pub entity: Option<Spanned<String>>,
    pub component_slots: Vec<ComponentSlot>,
    pub modifiers: Vec<ModifierRef>,
    pub technologies: Vec<TechRef>,
    pub utility_slots: UtilitySlots,
}

impl SectionTemplate {
    pub fn new(key: &str, path: RepoPath, ship_type: &str, slot: &str) -> Self {
        Self {
            key: key.to_string(),
            key_span: None,
            path,
            line: 1,
            ship_type: Spanned::detached(ship_type.to_string()),
            slot: Spanned::detached(slot.to_string()),
            entity: None,
            component_slots: Vec::new(),
            modifiers: Vec::new(),
            technologies: Vec::new(),
            utility_slots: UtilitySlots::default(),
        }
    }

    pub fn entity_name(&self) -> Option<&str> {
        self.entity.as_ref().map(|e| e.value.as_str())
    }

    /// Locators bound by the template's component slots.
    pub fn used_locators(&self) -> BTreeSet<&str> {
        self.component_slots
            .iter()
            .map(|c| c.locator.value.as_str())
            .collect()
    }

    pub fn location(&self, line: Option<u32>) -> Location {
        Location {
            path: self.path.clone(),
            line: Some(line.unwrap_or(self.line)),
        }
    }
}

/// Templates of one run plus the files they came from.
#[derive(Clone, Debug, Default)]
pub struct TemplateSet {
    pub files: Vec<RepoPath>,
    pub templates: Vec<SectionTemplate>,
}
