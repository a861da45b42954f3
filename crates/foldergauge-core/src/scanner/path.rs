/// Root path clean-up and validation.
///
/// Paths pasted from a terminal or file manager often carry surrounding
/// quotes or a trailing `>` from a shell prompt. These helpers strip such
/// artifacts, normalise the path lexically, and check that it names a
/// listable directory before any scanning starts.
use crate::error::ScanError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Strip whitespace, surrounding quotes and prompt `>` characters, then
/// normalise the remaining path.
pub fn sanitize_input(raw: &str) -> PathBuf {
    let mut s = raw;
    loop {
        let trimmed = s
            .trim()
            .trim_matches('"')
            .trim_matches('\'')
            .trim_end_matches('>')
            .trim_start_matches('>');
        if trimmed == s {
            break;
        }
        s = trimmed;
    }
    normalize(Path::new(s))
}

/// Lexically normalise a path: drop `.` components and resolve `..`
/// against preceding normal components. Symlinks are not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Normalise `path`, make it absolute, and require a listable directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, ScanError> {
    if path.as_os_str().is_empty() {
        return Err(ScanError::invalid_path(path, "empty path"));
    }

    let absolute = std::path::absolute(normalize(path))
        .map_err(|e| ScanError::invalid_path(path, e.to_string()))?;
    let root = normalize(&absolute);

    let meta = fs::metadata(&root).map_err(|e| ScanError::invalid_path(&root, e.to_string()))?;
    if !meta.is_dir() {
        return Err(ScanError::invalid_path(&root, "not a directory"));
    }
    fs::read_dir(&root)
        .map_err(|e| ScanError::invalid_path(&root, format!("cannot be listed: {e}")))?;

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_quotes_and_prompt_artifacts() {
        assert_eq!(sanitize_input("  \"/tmp/data\"  "), PathBuf::from("/tmp/data"));
        assert_eq!(sanitize_input("'/tmp/data'"), PathBuf::from("/tmp/data"));
        assert_eq!(sanitize_input("/tmp/data>"), PathBuf::from("/tmp/data"));
        assert_eq!(sanitize_input("\"/tmp/data\">"), PathBuf::from("/tmp/data"));
        assert_eq!(sanitize_input("> /tmp/data"), PathBuf::from("/tmp/data"));
    }

    #[test]
    fn sanitize_normalises_separators() {
        assert_eq!(sanitize_input("/tmp//data/"), PathBuf::from("/tmp/data"));
        assert_eq!(sanitize_input("/tmp/./data/../other"), PathBuf::from("/tmp/other"));
    }

    #[test]
    fn normalize_edge_cases() {
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(normalize(Path::new("")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn normalize_does_not_climb_above_root() {
        assert_eq!(normalize(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn resolve_root_accepts_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let resolved = resolve_root(tmp.path()).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
    }

    #[test]
    fn resolve_root_rejects_missing_paths_and_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            resolve_root(&missing),
            Err(ScanError::InvalidPath { .. })
        ));

        let file = tmp.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        match resolve_root(&file) {
            Err(ScanError::InvalidPath { reason, .. }) => assert_eq!(reason, "not a directory"),
            other => panic!("expected InvalidPath, got {other:?}"),
        }

        assert!(resolve_root(Path::new("")).is_err());
    }
}
