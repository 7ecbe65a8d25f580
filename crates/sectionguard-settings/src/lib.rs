//! Config parsing and profile/preset resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{
    BalanceConfig, CheckConfig, CuratedConfig, FixerConfig, LocatorFamilyConfig,
    SectionguardConfigV1,
};
pub use presets::PROFILES;
pub use resolve::{Overrides, ResolvedConfig};

/// Schema id accepted in the optional `schema` key.
pub const SCHEMA_CONFIG_V1: &str = "sectionguard.config.v1";

/// Parse `sectionguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SectionguardConfigV1> {
    let cfg: SectionguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profiles + overrides + per-check config).
pub fn resolve_config(
    cfg: SectionguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
