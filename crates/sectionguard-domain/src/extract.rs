//! Building a [`ReferenceDocument`] from parsed game files.
//!
//! File discovery and parsing live in the repo crate; this builder only folds parsed
//! content together so the result is independent of how files were read.

use crate::curated::CuratedTables;
use crate::model::SectionTemplate;
use sectionguard_types::{
    EntityRecord, ExtractionMeta, ExtractionWarning, ModifierTable, RepoPath, ReferenceDocument,
    SCHEMA_REFERENCE_V1, SlotContext, TechnologyTable, ToolMeta,
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
pub struct ReferenceBuilder {
    source: String,
    curated: CuratedTables,
    ship_types: BTreeMap<String, Vec<String>>,
    entities: BTreeMap<String, EntityRecord>,
    modifiers: BTreeSet<String>,
    technologies: BTreeSet<String>,
    files_parsed: u32,
    files_skipped: u32,
    templates_read: u32,
    warnings: Vec<ExtractionWarning>,
}

impl ReferenceBuilder {
    pub fn new(source: impl Into<String>, curated: CuratedTables) -> Self {
        Self {
            source: source.into(),
            modifiers: curated.valid_modifiers.clone(),
            technologies: curated.valid_technologies.clone(),
            curated,
            ship_types: BTreeMap::new(),
            entities: BTreeMap::new(),
            files_parsed: 0,
            files_skipped: 0,
            templates_read: 0,
            warnings: Vec::new(),
        }
    }

    /// Fold in the templates of one successfully parsed section template file.
    ///
    /// Ship types and slots are recorded for every template with a `ship_size`; entity
    /// contexts and locators only for templates naming an entity.
    pub fn add_section_file(&mut self, templates: &[SectionTemplate]) {
        self.files_parsed += 1;
        for template in templates {
            self.templates_read += 1;
            self.add_template(template);
        }
    }

    fn add_template(&mut self, template: &SectionTemplate) {
        for modifier in &template.modifiers {
            self.modifiers.insert(modifier.name.value.clone());
        }
        for tech in &template.technologies {
            self.technologies.insert(tech.name.value.clone());
        }

        let ship_type = template.ship_type.value.as_str();
        if ship_type.is_empty() {
            return;
        }
        let slot = template.slot.value.as_str();
        let slots = self.ship_types.entry(ship_type.to_string()).or_default();
        if !slots.iter().any(|s| s == slot) {
            slots.push(slot.to_string());
        }

        let Some(entity) = template.entity_name() else {
            return;
        };
        let record = self.entities.entry(entity.to_string()).or_default();
        record.contexts.insert(SlotContext::new(ship_type, slot));
        for component in &template.component_slots {
            record.locators.insert(component.locator.value.clone());
            if !component.template.is_empty() {
                record.component_templates.insert(component.template.clone());
            }
        }
    }

    /// Fold in one parsed non-section file that only contributes modifier keys.
    pub fn add_modifier_file<I, S>(&mut self, modifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files_parsed += 1;
        self.modifiers.extend(modifiers.into_iter().map(Into::into));
    }

    /// Fold in one parsed technology file (its top-level keys).
    pub fn add_technology_file<I, S>(&mut self, technologies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files_parsed += 1;
        self.technologies
            .extend(technologies.into_iter().map(Into::into));
    }

    pub fn skip_file(&mut self, path: RepoPath, line: Option<u32>, message: impl Into<String>) {
        self.files_skipped += 1;
        self.warnings.push(ExtractionWarning {
            path,
            line,
            message: message.into(),
        });
    }

    pub fn warnings(&self) -> &[ExtractionWarning] {
        &self.warnings
    }

    pub fn build(self, tool: ToolMeta) -> ReferenceDocument {
        // A curated "invalid" form that the game itself defines is valid after all.
        let modifier_replacements = self
            .curated
            .modifier_replacements
            .into_iter()
            .filter(|(from, _)| !self.modifiers.contains(from))
            .collect();
        let technology_replacements = self
            .curated
            .technology_replacements
            .into_iter()
            .filter(|(from, _)| !self.technologies.contains(from))
            .collect();

        ReferenceDocument {
            schema: SCHEMA_REFERENCE_V1.to_string(),
            tool,
            ship_types: self.ship_types,
            entities: self.entities,
            modifiers: ModifierTable {
                valid: self.modifiers,
                replacements: modifier_replacements,
            },
            technologies: TechnologyTable {
                valid: self.technologies,
                replacements: technology_replacements,
            },
            extraction: ExtractionMeta {
                source: self.source,
                files_parsed: self.files_parsed,
                files_skipped: self.files_skipped,
                templates_read: self.templates_read,
                warnings: self.warnings,
            },
        }
    }
}
