use crate::domain::tag;
use crate::error::{GorrError, Result};
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a release tag (e.g., "v1.2.3" -> Version(1,2,3)).
    ///
    /// The tag must already be a bare `v<int>.<int>.<int>`; describe suffixes
    /// have to be stripped with [`tag::base_tag`] first.
    pub fn from_tag(tag: &str) -> Result<Self> {
        if !tag::is_valid_version_tag(tag) {
            return Err(GorrError::InvalidVersionTag(tag.to_string()));
        }

        let mut parts = tag[1..].split('.').map(|part| {
            part.parse::<u64>()
                .map_err(|e| GorrError::version(format!("'{}' in tag '{}': {}", part, tag, e)))
        });

        // The regex guarantees exactly three components.
        let (Some(major), Some(minor), Some(patch)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(GorrError::InvalidVersionTag(tag.to_string()));
        };

        Ok(Version::new(major?, minor?, patch?))
    }

    /// Bump version according to bump type.
    ///
    /// Fails when the incremented component does not fit in a `u64`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || GorrError::version(format!("cannot bump {:?} of {}", bump_type, self));
        let next = match bump_type {
            VersionBump::Major => Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            },
        };
        Ok(next)
    }

    /// Release tag for this version (e.g., Version(1,2,3) -> "v1.2.3")
    pub fn tag(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}
