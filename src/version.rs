//! Immutable release version descriptor
//!
//! A release version is a (major, minor, patch) triple whose string form is
//! always the dot-joined `"{major}.{minor}.{patch}"`:
//!
//! ```
//! use distscan::version::VersionInfo;
//!
//! let version = VersionInfo::new(0, 3, 0);
//! assert_eq!(version.to_string(), "0.3.0");
//! assert_eq!("0.3.0".parse::<VersionInfo>().unwrap(), version);
//! ```
//!
//! There is no global version singleton: callers construct a `VersionInfo`
//! (usually the configuration layer) and thread it to wherever the release
//! identifier is needed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error type for version strings that are not a dotted integer triple
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid version string: {0:?}")]
pub struct VersionParseError(String);

/// An immutable (major, minor, patch) release version.
///
/// Equality, ordering, and the string form are pure functions of the triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionInfo {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionInfo {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionInfo {
    type Err = VersionParseError;

    /// Parse a dotted version string, normalizing partial versions.
    ///
    /// Missing components are padded with zeros:
    /// - "1" -> (1, 0, 0)
    /// - "1.2" -> (1, 2, 0)
    /// - "1.2.3" -> (1, 2, 3)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 3 {
            return Err(VersionParseError(s.to_string()));
        }

        let mut fields = [0u64; 3];
        for (field, part) in fields.iter_mut().zip(&parts) {
            *field = part
                .parse()
                .map_err(|_| VersionParseError(s.to_string()))?;
        }

        Ok(Self::new(fields[0], fields[1], fields[2]))
    }
}

impl From<VersionInfo> for semver::Version {
    fn from(version: VersionInfo) -> Self {
        semver::Version::new(version.major, version.minor, version.patch)
    }
}

impl Serialize for VersionInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
