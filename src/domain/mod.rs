//! Domain logic - pure release rules independent of git and the release tool

pub mod release;
pub mod tag;
pub mod version;

pub use release::{ReleaseRequest, ReleaseType};
pub use version::{Version, VersionBump};
