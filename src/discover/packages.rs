//! Marker-file package discovery
//!
//! A directory is an installable package when it directly contains the
//! marker file (`__init__.py` for Python trees). Discovery is an explicit
//! pre-order walk: a root is visited before its children, and the children
//! of each directory are visited in file-name order, so repeated runs over
//! an unchanged tree produce identical package lists.

use std::ffi::OsString;
use std::fs::{self, FileType};
use std::path::Path;

use tracing::{debug, warn};

use crate::discover::error::DiscoverError;

/// Discover dotted package paths under the declared `roots`.
///
/// Each root is a directory name relative to `working_dir`. Every directory
/// that directly contains a non-directory entry named `marker` is reported
/// as its path relative to `working_dir` with separators replaced by `.`,
/// root first. Subdirectories are scanned whether or not their parent
/// matched. A root with no marker anywhere contributes nothing; a root that
/// does not exist is an error.
pub fn discover_packages(
    working_dir: &Path,
    roots: &[String],
    marker: &str,
) -> Result<Vec<String>, DiscoverError> {
    let mut packages = Vec::new();

    for root in roots {
        let root_dir = working_dir.join(root);
        if !root_dir.is_dir() {
            return Err(DiscoverError::RootNotFound { path: root_dir });
        }
        walk(working_dir, &root_dir, marker, &mut packages)?;
    }

    Ok(packages)
}

fn walk(
    working_dir: &Path,
    dir: &Path,
    marker: &str,
    packages: &mut Vec<String>,
) -> Result<(), DiscoverError> {
    let entries = read_sorted(dir)?;

    let has_marker = entries
        .iter()
        .any(|(name, file_type)| !file_type.is_dir() && name.to_str() == Some(marker));
    if has_marker {
        match dotted_path(working_dir, dir) {
            Some(package) => {
                debug!(%package, "discovered package");
                packages.push(package);
            }
            None => warn!(
                path = %dir.display(),
                "skipping package with non-UTF-8 path"
            ),
        }
    }

    for (name, file_type) in entries {
        // file_type comes from the entry itself, so symlinked directories
        // are not descended into and no directory is visited twice.
        if !file_type.is_dir() {
            continue;
        }
        if name.to_str().is_none() {
            warn!(path = %dir.join(&name).display(), "skipping non-UTF-8 directory name");
            continue;
        }
        walk(working_dir, &dir.join(name), marker, packages)?;
    }

    Ok(())
}

/// Read the entries of `dir` once, sorted by file name.
fn read_sorted(dir: &Path) -> Result<Vec<(OsString, FileType)>, DiscoverError> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir).map_err(|source| DiscoverError::io(dir, source))? {
        let entry = entry.map_err(|source| DiscoverError::io(dir, source))?;
        let file_type = entry
            .file_type()
            .map_err(|source| DiscoverError::io(entry.path(), source))?;
        entries.push((entry.file_name(), file_type));
    }

    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(entries)
}

/// Render `dir` relative to `working_dir` as a dotted module path.
///
/// Returns `None` when a component is not valid UTF-8.
fn dotted_path(working_dir: &Path, dir: &Path) -> Option<String> {
    let relative = dir.strip_prefix(working_dir).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MARKER: &str = "__init__.py";

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn reports_root_and_nested_packages_root_first() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("toxins").join(MARKER));
        touch(&temp_dir.path().join("toxins/sub").join(MARKER));

        let packages =
            discover_packages(temp_dir.path(), &["toxins".to_string()], MARKER).unwrap();

        assert_eq!(packages, vec!["toxins", "toxins.sub"]);
    }

    #[test]
    fn children_are_visited_in_file_name_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("pkg").join(MARKER));
        touch(&temp_dir.path().join("pkg/zeta").join(MARKER));
        touch(&temp_dir.path().join("pkg/alpha").join(MARKER));
        touch(&temp_dir.path().join("pkg/alpha/deep").join(MARKER));

        let packages = discover_packages(temp_dir.path(), &["pkg".to_string()], MARKER).unwrap();

        assert_eq!(
            packages,
            vec!["pkg", "pkg.alpha", "pkg.alpha.deep", "pkg.zeta"]
        );
    }

    #[test]
    fn descends_through_directories_without_marker() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("pkg").join(MARKER));
        // "data" has no marker but its child does
        touch(&temp_dir.path().join("pkg/data/inner").join(MARKER));

        let packages = discover_packages(temp_dir.path(), &["pkg".to_string()], MARKER).unwrap();

        assert_eq!(packages, vec!["pkg", "pkg.data.inner"]);
    }

    #[test]
    fn directory_named_like_marker_is_not_a_marker() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("pkg").join(MARKER)).unwrap();

        let packages = discover_packages(temp_dir.path(), &["pkg".to_string()], MARKER).unwrap();

        assert!(packages.is_empty());
    }

    #[test]
    fn root_without_marker_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("pkg/notes.txt"));

        let packages = discover_packages(temp_dir.path(), &["pkg".to_string()], MARKER).unwrap();

        assert!(packages.is_empty());
    }

    #[test]
    fn missing_root_is_an_error_naming_the_path() {
        let temp_dir = TempDir::new().unwrap();

        let err =
            discover_packages(temp_dir.path(), &["absent".to_string()], MARKER).unwrap_err();

        match &err {
            DiscoverError::RootNotFound { path } => {
                assert!(path.ends_with("absent"));
            }
            other => panic!("expected RootNotFound, got {other:?}"),
        }
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn multiple_roots_concatenate_in_declaration_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("second").join(MARKER));
        touch(&temp_dir.path().join("first").join(MARKER));

        let packages = discover_packages(
            temp_dir.path(),
            &["second".to_string(), "first".to_string()],
            MARKER,
        )
        .unwrap();

        assert_eq!(packages, vec!["second", "first"]);
    }

    #[test]
    fn repeated_runs_over_an_unchanged_tree_are_identical() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("pkg").join(MARKER));
        touch(&temp_dir.path().join("pkg/a").join(MARKER));
        touch(&temp_dir.path().join("pkg/b").join(MARKER));
        touch(&temp_dir.path().join("pkg/b/c").join(MARKER));

        let roots = vec!["pkg".to_string()];
        let first = discover_packages(temp_dir.path(), &roots, MARKER).unwrap();
        let second = discover_packages(temp_dir.path(), &roots, MARKER).unwrap();

        assert_eq!(first, second);
    }
}
