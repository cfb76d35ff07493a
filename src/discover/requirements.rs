//! Requirement list reading
//!
//! Requirement lists are plain-text files under the requirements directory,
//! one requirement per line, resolved from a list name as `<name>.txt`.
//! Files are read fully and in caller order; blank lines are dropped and the
//! first occurrence of a requirement wins across all files.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexSet;
use pep508_rs::{Requirement, VerbatimUrl};
use tracing::warn;

use crate::discover::error::DiscoverError;

/// Read and combine the named requirement lists under `requirements_dir`.
///
/// An unreadable file aborts with its path; there are no partial reads.
/// Lines that do not parse as PEP 508 requirements are kept verbatim but
/// draw a warning, so typos surface without failing the build.
pub fn read_requirements(
    working_dir: &Path,
    requirements_dir: &str,
    names: &[String],
) -> Result<Vec<String>, DiscoverError> {
    let mut requirements: IndexSet<String> = IndexSet::new();

    for name in names {
        let path = working_dir
            .join(requirements_dir)
            .join(format!("{name}.txt"));
        let content = fs::read_to_string(&path)
            .map_err(|source| DiscoverError::io(&path, source))?;

        for line in content.lines() {
            let requirement = line.trim();
            if requirement.is_empty() {
                continue;
            }
            if !requirement.starts_with('#')
                && Requirement::<VerbatimUrl>::from_str(requirement).is_err()
            {
                warn!(
                    file = %path.display(),
                    requirement,
                    "requirement does not parse as PEP 508"
                );
            }
            requirements.insert(requirement.to_string());
        }
    }

    Ok(requirements.into_iter().collect())
}
