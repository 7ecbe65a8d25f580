//! Render use cases: text, Markdown and GitHub annotations from in-memory reports.

use sectionguard_render::{RenderableFix, RenderableReport};
use sectionguard_types::BalanceReport;

pub fn render_text(report: &RenderableReport) -> String {
    sectionguard_render::render_text(report)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    sectionguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    sectionguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_fix_text(fix: &RenderableFix) -> String {
    sectionguard_render::render_fix_text(fix)
}

pub fn render_fix_markdown(fix: &RenderableFix) -> String {
    sectionguard_render::render_fix_markdown(fix)
}

pub fn render_balance(report: &BalanceReport) -> String {
    sectionguard_render::render_balance_table(&report.entries)
}
