//! Stable identifiers for checks, issue codes, and fixer rules.
//!
//! `check_id` is a dotted namespace. `code` is the snake_case issue category.

// Checks, in evaluation order.
pub const CHECK_SECTION_SHIP_TYPE: &str = "section.ship_type";
pub const CHECK_SECTION_SLOT: &str = "section.slot";
pub const CHECK_SECTION_ENTITY_CONTEXT: &str = "section.entity_context";
pub const CHECK_SECTION_ENTITY_KNOWN: &str = "section.entity_known";
pub const CHECK_SECTION_LOCATORS: &str = "section.locators";
pub const CHECK_SECTION_MODIFIERS: &str = "section.modifiers";
pub const CHECK_SECTION_TECHS: &str = "section.techs";

// Codes (one per check)
pub const CODE_INVALID_SHIP_TYPE: &str = "invalid_ship_type";
pub const CODE_INVALID_SLOT: &str = "invalid_slot";
pub const CODE_WRONG_ENTITY_CONTEXT: &str = "wrong_entity_context";
pub const CODE_UNKNOWN_ENTITY: &str = "unknown_entity";
pub const CODE_INVALID_LOCATOR: &str = "invalid_locator";
pub const CODE_INVALID_MODIFIER: &str = "invalid_modifier";
pub const CODE_INVALID_TECH: &str = "invalid_tech";

// Balance
pub const CODE_TIER_MISMATCH: &str = "tier_mismatch";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

// Fixer rules, in priority order.
pub const FIX_ALTERNATIVE_ENTITY: &str = "fix.alternative_entity";
pub const FIX_DEFAULT_ENTITY: &str = "fix.default_entity";
pub const FIX_RICHEST_ENTITY: &str = "fix.richest_entity";
pub const FIX_NORMALIZE_SLOT: &str = "fix.normalize_slot";
pub const FIX_REPLACE_MODIFIER: &str = "fix.replace_modifier";
pub const FIX_REMOVE_MODIFIER: &str = "fix.remove_modifier";
pub const FIX_REPLACE_TECH: &str = "fix.replace_tech";
pub const FIX_REMOVE_TECH: &str = "fix.remove_tech";
pub const FIX_EQUIVALENT_LOCATOR: &str = "fix.equivalent_locator";
pub const FIX_DROP_LOCATOR: &str = "fix.drop_locator";
/// Opt-in, runs after the chain above.
pub const FIX_RENAME_TIER: &str = "fix.rename_tier";
