use sectionguard_types::BalanceEntry;

/// Fixed-width table of balance entries, one row per template.
pub fn render_balance_table(entries: &[BalanceEntry]) -> String {
    let headers = ["template", "ship", "slot", "points", "tier", "declared", "note"];
    let rows: Vec<[String; 7]> = entries
        .iter()
        .map(|e| {
            let mut notes = Vec::new();
            if e.tier_mismatch {
                notes.push("tier mismatch".to_string());
            }
            if !e.unpriced_components.is_empty() {
                notes.push(format!("unpriced: {}", e.unpriced_components.join(", ")));
            }
            [
                e.template.clone(),
                e.ship_type.clone(),
                e.slot.clone(),
                e.points.to_string(),
                e.tier.clone(),
                e.declared_tier.clone().unwrap_or_else(|| "-".to_string()),
                notes.join("; "),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let mismatches = entries.iter().filter(|e| e.tier_mismatch).count();
    out.push_str(&format!(
        "\n{} templates, {} tier mismatches\n",
        entries.len(),
        mismatches
    ));
    out
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
