//! The `analyze` and `calc` use cases: point-budget balance scoring.

use crate::config::resolve_config_text;
use crate::report::tool_meta;
use anyhow::Context;
use camino::Utf8Path;
use sectionguard_domain::balance::{DesignScore, analyze, score_notation};
use sectionguard_settings::Overrides;
use sectionguard_types::{BalanceReport, SCHEMA_BALANCE_V1};

#[derive(Clone, Debug)]
pub struct AnalyzeInput<'a> {
    pub mod_root: &'a Utf8Path,
    pub templates_dir: &'a Utf8Path,
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Keep only templates whose declared tier disagrees with their points.
    pub mismatches_only: bool,
}

pub fn run_analyze(input: AnalyzeInput<'_>) -> anyhow::Result<BalanceReport> {
    let resolved = resolve_config_text(input.config_text, input.overrides)?;
    let (_, set) = sectionguard_repo::load_template_set(input.mod_root, input.templates_dir)
        .context("load mod templates")?;

    let mut entries = analyze(&set.templates, &resolved.effective.balance);
    let mismatches = entries.iter().filter(|e| e.tier_mismatch).count() as u32;
    if input.mismatches_only {
        entries.retain(|e| e.tier_mismatch);
    }

    Ok(BalanceReport {
        schema: SCHEMA_BALANCE_V1.to_string(),
        tool: tool_meta(),
        entries,
        mismatches,
    })
}

#[derive(Clone, Debug)]
pub struct CalcInput<'a> {
    pub notation: &'a str,
    pub ship_type: &'a str,
    pub config_text: &'a str,
    pub overrides: Overrides,
}

pub fn run_calc(input: CalcInput<'_>) -> anyhow::Result<DesignScore> {
    let resolved = resolve_config_text(input.config_text, input.overrides)?;
    score_notation(input.notation, input.ship_type, &resolved.effective.balance)
        .with_context(|| format!("score design notation '{}'", input.notation))
}

pub fn format_score(score: &DesignScore) -> String {
    let mut parts: Vec<String> = score
        .weapons
        .iter()
        .map(|(code, n)| format!("{code}x{n}"))
        .collect();
    if score.large_utility > 0 {
        parts.push(format!("ULx{}", score.large_utility));
    }
    if score.small_utility > 0 {
        parts.push(format!("USx{}", score.small_utility));
    }
    if score.aux > 0 {
        parts.push(format!("AUXx{}", score.aux));
    }
    format!(
        "{} on {}: {} points, tier {} ({})\n",
        score.notation,
        score.ship_type,
        score.points,
        score.tier.as_str(),
        parts.join(" ")
    )
}
