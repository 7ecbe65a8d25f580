use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a template issue.
///
/// Identity fields:
/// - check_id
/// - code
/// - file path (repo-relative)
/// - template key
/// - offending identifier
///
/// Line numbers are left out so the fingerprint survives unrelated edits above the
/// template.
pub fn fingerprint_for_issue(
    check_id: &str,
    code: &str,
    path: &str,
    template: &str,
    identifier: &str,
) -> String {
    let canonical = [check_id, code, path, template, identifier].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
