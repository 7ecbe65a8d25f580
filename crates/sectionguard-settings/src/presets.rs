use sectionguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use sectionguard_types::{Severity, ids};

pub const PROFILES: &[&str] = &["strict", "warn", "lenient"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "lenient" => lenient_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        ..EffectiveConfig::default()
    }
}

/// Everything reported, but only a wrong-context entity fails the run.
fn warn_profile() -> EffectiveConfig {
    let mut cfg = EffectiveConfig {
        profile: "warn".to_string(),
        ..EffectiveConfig::default()
    };
    for check_id in [
        ids::CHECK_SECTION_SHIP_TYPE,
        ids::CHECK_SECTION_SLOT,
        ids::CHECK_SECTION_LOCATORS,
    ] {
        cfg.checks
            .insert(check_id.to_string(), CheckPolicy::enabled(Severity::Warning));
    }
    cfg
}

/// `warn` without the modifier and technology checks.
fn lenient_profile() -> EffectiveConfig {
    let mut cfg = warn_profile();
    cfg.profile = "lenient".to_string();
    for check_id in [ids::CHECK_SECTION_MODIFIERS, ids::CHECK_SECTION_TECHS] {
        cfg.checks
            .insert(check_id.to_string(), CheckPolicy::disabled());
    }
    cfg
}
