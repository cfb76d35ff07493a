//! Build manifest assembly
//!
//! Groups the three discovery passes and the metadata passthrough into the
//! single plain-data value handed to the downstream packaging invocation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::BuildConfig;
use crate::discover::error::DiscoverError;
use crate::discover::packages::discover_packages;
use crate::discover::requirements::read_requirements;
use crate::discover::scripts::discover_scripts;

/// Everything the packaging invocation needs, as plain data.
///
/// Field names follow the downstream packaging call's keyword arguments, so
/// the serialized form can be consumed without renaming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    pub keywords: Vec<String>,
    pub classifiers: Vec<String>,
    pub packages: Vec<String>,
    pub scripts: Vec<PathBuf>,
    pub install_requires: Vec<String>,
}

impl BuildManifest {
    /// Run package, script, and requirement discovery under `working_dir`
    /// and combine the results with the configured metadata.
    ///
    /// Discovery is fully sequential; the first failed read aborts assembly.
    pub fn assemble(working_dir: &Path, config: &BuildConfig) -> Result<Self, DiscoverError> {
        let packages =
            discover_packages(working_dir, &config.root_packages, &config.marker_file)?;
        let scripts = discover_scripts(working_dir, &config.scripts_dir)?;
        let install_requires = read_requirements(
            working_dir,
            &config.requirements_dir,
            &config.install_requirements,
        )?;

        debug!(
            packages = packages.len(),
            scripts = scripts.len(),
            requirements = install_requires.len(),
            "assembled build manifest"
        );

        Ok(Self {
            name: config.name.clone(),
            version: config.version.to_string(),
            description: config.description.clone(),
            author: config.author.clone(),
            author_email: config.author_email.clone(),
            keywords: config.keywords.clone(),
            classifiers: config.classifiers.clone(),
            packages,
            scripts,
            install_requires,
        })
    }
}
