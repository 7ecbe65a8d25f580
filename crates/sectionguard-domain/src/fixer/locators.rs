use crate::policy::LocatorFamily;
use std::collections::BTreeSet;

/// Trailing `_NN` of a locator name, if any.
fn numeric_suffix(locator: &str) -> Option<&str> {
    let (_, tail) = locator.rsplit_once('_')?;
    (!tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit())).then_some(tail)
}

/// Nearest valid locator for `invalid` through the family table.
///
/// The family is the longest `family` prefix of `invalid`. Its preferences are tried in
/// order; within one preference a locator with the same numeric suffix wins, then one
/// no other component slot uses, then the first by name.
pub fn equivalent_locator(
    invalid: &str,
    valid: &BTreeSet<String>,
    used_elsewhere: &BTreeSet<&str>,
    families: &[LocatorFamily],
) -> Option<String> {
    let family = families
        .iter()
        .filter(|f| invalid.starts_with(f.family.as_str()))
        .max_by_key(|f| f.family.len())?;
    let suffix = numeric_suffix(invalid);

    for prefix in &family.prefer {
        let candidates: Vec<&String> = valid
            .iter()
            .filter(|l| l.starts_with(prefix.as_str()) && l.as_str() != invalid)
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let same_suffix = candidates
            .iter()
            .find(|l| suffix.is_some() && numeric_suffix(l) == suffix);
        let unused = candidates
            .iter()
            .find(|l| !used_elsewhere.contains(l.as_str()));
        let chosen = same_suffix.or(unused).unwrap_or(&candidates[0]);
        return Some(chosen.to_string());
    }
    None
}
