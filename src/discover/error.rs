use std::path::PathBuf;

use thiserror::Error;

/// Error type for discovery operations
///
/// Every failure carries the path that could not be read. Discovery never
/// retries; the surrounding build invocation aborts on the first error.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// A declared root package directory is absent or not a directory.
    /// An absent root means the build configuration no longer matches the
    /// source tree, so it is not silently skipped.
    #[error("Root package directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// A directory or file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
