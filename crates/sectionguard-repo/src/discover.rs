use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Include pattern for script files.
pub const SCRIPT_GLOB: &str = "*.txt";

/// Discover script files below `dir`, sorted by path.
///
/// Matching is on the file name only, so `*.txt` finds files at any depth.
pub fn discover_script_files(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    discover_files(dir, &[SCRIPT_GLOB.to_string()])
}

pub fn discover_files(dir: &Utf8Path, patterns: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("directory not found: {}", dir);
    }
    let set = build_globset(patterns).context("compile include globset")?;

    let mut out: Vec<Utf8PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| set.is_match(e.file_name()))
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<globset::GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    #[test]
    fn finds_txt_files_at_any_depth_in_sorted_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("b.txt"), "");
        write_file(&root.join("a.txt"), "");
        write_file(&root.join("nested/c.txt"), "");
        write_file(&root.join("readme.md"), "");
        write_file(&root.join("d.txt.bak"), "");

        let files = discover_script_files(&root).expect("discover");
        let rel: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(&root).expect("below root").to_string())
            .collect();
        assert_eq!(rel, vec!["a.txt", "b.txt", "nested/c.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = discover_script_files(&root.join("nope")).unwrap_err();
        assert!(err.to_string().contains("directory not found"));
    }

    #[test]
    fn invalid_glob_returns_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = discover_files(&root, &["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("compile include globset"));
    }

    #[test]
    fn pathbuf_to_utf8_rejects_invalid() {
        #[cfg(unix)]
        {
            use std::ffi::OsString;
            use std::os::unix::ffi::OsStringExt;
            let invalid = OsString::from_vec(vec![0xFF, 0xFE, 0xFD]);
            let path = PathBuf::from(invalid);
            assert!(pathbuf_to_utf8(path).is_none());
        }
    }
}
