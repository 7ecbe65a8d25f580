use anyhow::Context;
use sectionguard_settings::{Overrides, ResolvedConfig, SectionguardConfigV1};

/// Parse and resolve configuration text. Empty text means defaults.
pub fn resolve_config_text(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        SectionguardConfigV1::default()
    } else {
        sectionguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    sectionguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = resolve_config_text("  \n", Overrides::default()).expect("resolve");
        assert_eq!(resolved.effective.profile, "strict");
    }

    #[test]
    fn override_profile_wins() {
        let resolved = resolve_config_text(
            "profile = \"strict\"\n",
            Overrides {
                profile: Some("warn".to_string()),
                ..Overrides::default()
            },
        )
        .expect("resolve");
        assert_eq!(resolved.effective.profile, "warn");
    }

    #[test]
    fn bad_toml_has_context() {
        let err = resolve_config_text("profile = [", Overrides::default()).unwrap_err();
        assert_eq!(err.to_string(), "parse config");
    }
}
