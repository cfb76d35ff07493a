//! Discovery layer
//! - packages.rs: marker-file package discovery
//! - scripts.rs: executable script discovery
//! - requirements.rs: requirement list reading
//! - error.rs: error type for discovery operations

pub mod error;
pub mod packages;
pub mod requirements;
pub mod scripts;

pub use error::DiscoverError;
pub use packages::discover_packages;
pub use requirements::read_requirements;
pub use scripts::discover_scripts;
