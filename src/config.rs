use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::version::VersionInfo;

// =============================================================================
// Discovery defaults
// =============================================================================

/// Default marker file whose presence makes a directory an installable package
pub const DEFAULT_MARKER_FILE: &str = "__init__.py";

/// Default directory scanned for executable entry-point scripts
pub const DEFAULT_SCRIPTS_DIR: &str = "bin";

/// Default directory holding plain-text requirement lists
pub const DEFAULT_REQUIREMENTS_DIR: &str = "requirements";

/// Default configuration file name, resolved under the working directory
pub const CONFIG_FILE_NAME: &str = "distscan.json";

/// Build configuration structure
///
/// An explicit immutable value injected into manifest assembly; there is no
/// module-global configuration state. Missing fields fall back to the
/// documented defaults, so a minimal project only declares its name,
/// version, and root packages.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Distribution name passed through to the manifest
    pub name: String,
    /// Release version, written as a dotted string (e.g. "0.3.0")
    pub version: VersionInfo,
    pub description: String,
    pub author: String,
    pub author_email: String,
    pub keywords: Vec<String>,
    pub classifiers: Vec<String>,
    /// Top-level directory names scanned for marker files
    pub root_packages: Vec<String>,
    /// Marker file that makes a directory an installable package
    pub marker_file: String,
    /// Directory scanned for executable scripts
    pub scripts_dir: String,
    /// Directory holding requirement lists
    pub requirements_dir: String,
    /// Requirement list names, resolved as `<requirementsDir>/<name>.txt`
    pub install_requirements: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: VersionInfo::new(0, 1, 0),
            description: String::new(),
            author: String::new(),
            author_email: String::new(),
            keywords: Vec::new(),
            classifiers: Vec::new(),
            root_packages: Vec::new(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            scripts_dir: DEFAULT_SCRIPTS_DIR.to_string(),
            requirements_dir: DEFAULT_REQUIREMENTS_DIR.to_string(),
            install_requirements: vec!["install".to_string()],
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BuildConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file falls back to [`BuildConfig::default`]; an unreadable
    /// or malformed file is an error naming the path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the default configuration file path under `working_dir`.
    pub fn default_path(working_dir: &Path) -> PathBuf {
        working_dir.join(CONFIG_FILE_NAME)
    }
}
