use crate::model::{BalanceConfig, CuratedConfig, FixerConfig, SectionguardConfigV1};
use crate::presets::{self, PROFILES};
use anyhow::Context;
use globset::Glob;
use sectionguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, LocatorFamily};
use sectionguard_types::{IssueCategory, Severity, SlotContext, ids};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_issues: Option<u32>,
    pub fail_on: Option<String>,
    /// `Some(true)` from `fix --rename-tiers`.
    pub rename_tiers: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: SectionguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());
    if !PROFILES.contains(&profile.as_str()) {
        anyhow::bail!(
            "unknown profile: {profile} (expected {})",
            PROFILES.join("|")
        );
    }

    let mut effective = presets::preset(&profile);

    // max issues
    if let Some(max) = overrides.max_issues.or(cfg.max_issues) {
        effective.max_issues = Some(max as usize);
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        if IssueCategory::from_check_id(check_id).is_none() {
            anyhow::bail!("unknown check id in [checks]: {check_id}");
        }
        if check_id == ids::CHECK_SECTION_ENTITY_CONTEXT {
            reject_entity_context_override(cc.enabled, cc.severity.as_deref(), &cc.allow)?;
            continue;
        }

        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
        if !cc.allow.is_empty() {
            validate_allowlist(check_id, &cc.allow)?;
            entry.allow = cc.allow.clone();
        }
    }

    // fail_on: CLI over config over preset
    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    for (alias, slot) in cfg.slot_aliases {
        if alias.is_empty() || slot.is_empty() {
            anyhow::bail!("slot_aliases entries need a non-empty alias and slot");
        }
        effective.slot_aliases.insert(alias, slot);
    }

    apply_fixer(&mut effective, cfg.fixer)?;
    if let Some(rename) = overrides.rename_tiers {
        effective.fixer.rename_tiers = rename;
    }
    apply_curated(&mut effective, cfg.curated);
    apply_balance(&mut effective, cfg.balance);

    Ok(ResolvedConfig { effective })
}

/// The entity-context check guards against a game crash; configuration may restate its
/// defaults but never weaken it.
fn reject_entity_context_override(
    enabled: Option<bool>,
    severity: Option<&str>,
    allow: &[String],
) -> anyhow::Result<()> {
    let check_id = ids::CHECK_SECTION_ENTITY_CONTEXT;
    if enabled == Some(false) {
        anyhow::bail!("{check_id} cannot be disabled");
    }
    if let Some(sev) = severity {
        let parsed =
            parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        if parsed != Severity::Error {
            anyhow::bail!("{check_id} cannot be downgraded below error");
        }
    }
    if !allow.is_empty() {
        anyhow::bail!("{check_id} does not accept an allowlist");
    }
    Ok(())
}

fn apply_fixer(effective: &mut EffectiveConfig, fixer: FixerConfig) -> anyhow::Result<()> {
    for (context, entity) in fixer.default_entities {
        let ctx = parse_slot_context(&context)
            .with_context(|| format!("invalid key in [fixer.default_entities]: {context}"))?;
        effective.fixer.default_entities.insert(ctx, entity);
    }

    if !fixer.locator_equivalents.is_empty() {
        let configured: Vec<LocatorFamily> = fixer
            .locator_equivalents
            .into_iter()
            .map(|f| LocatorFamily {
                family: f.family,
                prefer: f.prefer,
            })
            .collect();
        if let Some(empty) = configured.iter().find(|f| f.family.is_empty()) {
            anyhow::bail!(
                "fixer.locator_equivalents entry has an empty family (prefer = {:?})",
                empty.prefer
            );
        }
        effective
            .fixer
            .locator_equivalents
            .retain(|builtin| !configured.iter().any(|c| c.family == builtin.family));
        let builtin = std::mem::take(&mut effective.fixer.locator_equivalents);
        effective.fixer.locator_equivalents = configured.into_iter().chain(builtin).collect();
    }

    if let Some(richest) = fixer.richest_entity_fallback {
        effective.fixer.richest_entity_fallback = richest;
    }
    if let Some(rename) = fixer.rename_tiers {
        effective.fixer.rename_tiers = rename;
    }
    Ok(())
}

fn apply_curated(effective: &mut EffectiveConfig, curated: CuratedConfig) {
    let tables = &mut effective.curated;
    tables.valid_modifiers.extend(curated.extra_modifiers);
    tables.valid_technologies.extend(curated.extra_technologies);
    for (from, to) in curated.modifier_replacements {
        let to = (!to.is_empty()).then_some(to);
        tables.modifier_replacements.insert(from, to);
    }
    tables
        .technology_replacements
        .extend(curated.tech_replacements);
}

fn apply_balance(effective: &mut EffectiveConfig, balance: BalanceConfig) {
    effective.balance.weapon_costs.extend(balance.weapon_costs);
    effective.balance.aux_costs.extend(balance.aux_costs);
}

fn parse_slot_context(v: &str) -> anyhow::Result<SlotContext> {
    match v.split_once('.') {
        Some((ship, slot)) if !ship.is_empty() && !slot.is_empty() && !slot.contains('.') => {
            Ok(SlotContext::new(ship, slot))
        }
        _ => anyhow::bail!("expected \"ship_type.slot\""),
    }
}

fn validate_allowlist(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid allow glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(toml: &str) -> anyhow::Result<EffectiveConfig> {
        let cfg = parse_config_toml(toml)?;
        Ok(resolve_config(cfg, Overrides::default())?.effective)
    }

    fn error_text(toml: &str) -> String {
        match resolve(toml) {
            Ok(_) => panic!("expected resolution to fail"),
            Err(err) => format!("{err:#}"),
        }
    }

    #[test]
    fn empty_config_is_strict() {
        let cfg = resolve("").expect("resolve");
        assert_eq!(cfg.profile, "strict");
        assert_eq!(cfg.fail_on, FailOn::Error);
        assert_eq!(cfg.max_issues, None);
        assert_eq!(
            cfg.check_policy(ids::CHECK_SECTION_SLOT).map(|p| p.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn warn_profile_keeps_entity_context_an_error() {
        let cfg = resolve("profile = \"warn\"").expect("resolve");
        assert_eq!(
            cfg.check_policy(ids::CHECK_SECTION_SHIP_TYPE).map(|p| p.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            cfg.check_policy(ids::CHECK_SECTION_ENTITY_CONTEXT).map(|p| p.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn lenient_profile_disables_modifier_and_tech_checks() {
        let cfg = resolve("profile = \"lenient\"").expect("resolve");
        assert!(cfg.check_policy(ids::CHECK_SECTION_MODIFIERS).is_none());
        assert!(cfg.check_policy(ids::CHECK_SECTION_TECHS).is_none());
        assert!(cfg.check_policy(ids::CHECK_SECTION_ENTITY_KNOWN).is_some());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let cfg = parse_config_toml("profile = \"warn\"\nmax_issues = 10\nfail_on = \"error\"")
            .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                profile: Some("strict".to_string()),
                max_issues: Some(3),
                fail_on: Some("warning".to_string()),
                rename_tiers: Some(true),
            },
        )
        .expect("resolve")
        .effective;
        assert_eq!(resolved.profile, "strict");
        assert_eq!(resolved.max_issues, Some(3));
        assert_eq!(resolved.fail_on, FailOn::Warning);
        assert!(resolved.fixer.rename_tiers);
    }

    #[test]
    fn entity_context_cannot_be_weakened() {
        let disabled = error_text("[checks.\"section.entity_context\"]\nenabled = false");
        assert!(disabled.contains("cannot be disabled"), "{disabled}");

        let downgraded = error_text("[checks.\"section.entity_context\"]\nseverity = \"warning\"");
        assert!(downgraded.contains("cannot be downgraded"), "{downgraded}");

        let allowed = error_text("[checks.\"section.entity_context\"]\nallow = [\"x\"]");
        assert!(allowed.contains("allowlist"), "{allowed}");

        resolve("[checks.\"section.entity_context\"]\nenabled = true\nseverity = \"error\"")
            .expect("restating the defaults is fine");
    }

    #[test]
    fn allowlist_globs_are_validated() {
        let cfg = resolve("[checks.\"section.entity_known\"]\nallow = [\"my_mod_*\"]").expect("resolve");
        assert_eq!(
            cfg.check_policy(ids::CHECK_SECTION_ENTITY_KNOWN).map(|p| p.allow.clone()),
            Some(vec!["my_mod_*".to_string()])
        );

        let err = error_text("[checks.\"section.entity_known\"]\nallow = [\"[\"]");
        assert!(err.contains("invalid allow glob"), "{err}");
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(error_text("profile = \"chill\"").contains("unknown profile"));
        assert!(error_text("[checks.\"deps.no_wildcards\"]\nenabled = true").contains("unknown check id"));
        assert!(error_text("fail_on = \"info\"").contains("unknown fail_on"));
        assert!(
            error_text("[checks.\"section.modifiers\"]\nseverity = \"info\"")
                .contains("invalid severity for section.modifiers")
        );
    }

    #[test]
    fn fixer_and_curated_sections_merge_over_defaults() {
        let cfg = resolve(
            r#"
[slot_aliases]
front = "bow"

[fixer]
richest_entity_fallback = true
rename_tiers = true
default_entities = { "cruiser.stern" = "cruiser_stern_entity" }

[[fixer.locator_equivalents]]
family = "xl_gun"
prefer = ["medium_gun"]

[curated]
extra_modifiers = ["my_mod_modifier"]
modifier_replacements = { old_modifier = "ship_armor_add", gone_modifier = "" }
tech_replacements = { tech_old = "tech_cruisers" }

[balance]
weapon_costs = { my_turret = 3 }
aux_costs = { my_ship = 6 }
"#,
        )
        .expect("resolve");

        assert_eq!(cfg.slot_aliases.get("front").map(String::as_str), Some("bow"));
        assert_eq!(cfg.slot_aliases.get("core").map(String::as_str), Some("mid"));
        assert!(cfg.fixer.richest_entity_fallback);
        assert!(cfg.fixer.rename_tiers);
        assert_eq!(
            cfg.fixer
                .default_entities
                .get(&SlotContext::new("cruiser", "stern"))
                .map(String::as_str),
            Some("cruiser_stern_entity")
        );
        assert_eq!(cfg.fixer.locator_equivalents[0].family, "xl_gun");
        assert_eq!(cfg.fixer.locator_equivalents[0].prefer, vec!["medium_gun".to_string()]);
        assert_eq!(
            cfg.fixer
                .locator_equivalents
                .iter()
                .filter(|f| f.family == "xl_gun")
                .count(),
            1
        );
        assert!(cfg.curated.valid_modifiers.contains("my_mod_modifier"));
        assert_eq!(
            cfg.curated.modifier_replacements.get("gone_modifier"),
            Some(&None)
        );
        assert_eq!(
            cfg.curated.technology_replacements.get("tech_old").map(String::as_str),
            Some("tech_cruisers")
        );
        assert_eq!(cfg.balance.weapon_costs.get("my_turret"), Some(&3));
        assert_eq!(cfg.balance.aux_cost("my_ship"), 6);
    }

    #[test]
    fn default_entity_keys_need_ship_and_slot() {
        let err = error_text("[fixer.default_entities]\ncruiser = \"x\"");
        assert!(err.contains("invalid key in [fixer.default_entities]"), "{err}");
    }
}
