//! Executable script discovery
//!
//! Scripts are the direct children of the scripts directory that are regular
//! files with the execute bit available to this process. Subdirectories and
//! plain data files are skipped; a project without a scripts directory
//! installs no scripts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::discover::error::DiscoverError;

/// Discover executable scripts directly under `scripts_dir`.
///
/// Returned paths are relative to `working_dir` (e.g. `bin/tox-refresh`),
/// in filesystem listing order. A missing scripts directory yields an empty
/// list; any other read failure propagates with the offending path.
pub fn discover_scripts(
    working_dir: &Path,
    scripts_dir: &str,
) -> Result<Vec<PathBuf>, DiscoverError> {
    let dir = working_dir.join(scripts_dir);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "no scripts directory");
            return Ok(Vec::new());
        }
        Err(source) => return Err(DiscoverError::io(dir, source)),
    };

    let mut scripts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoverError::io(&dir, source))?;
        let metadata = fs::metadata(entry.path())
            .map_err(|source| DiscoverError::io(entry.path(), source))?;
        if metadata.is_file() && is_executable(&metadata) {
            let script = PathBuf::from(scripts_dir).join(entry.file_name());
            debug!(script = %script.display(), "discovered script");
            scripts.push(script);
        }
    }

    Ok(scripts)
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

// No execute bit outside Unix; every regular file in the scripts directory
// qualifies there.
#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    true
}
