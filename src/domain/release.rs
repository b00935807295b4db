use crate::domain::VersionBump;
use crate::error::GorrError;
use std::fmt;
use std::str::FromStr;

/// Kind of release requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Patch,
    Minor,
    Major,
    /// Snapshot build; nothing is tagged or pushed
    Local,
}

impl ReleaseType {
    pub const ALL: [ReleaseType; 4] = [
        ReleaseType::Patch,
        ReleaseType::Minor,
        ReleaseType::Major,
        ReleaseType::Local,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Patch => "patch",
            ReleaseType::Minor => "minor",
            ReleaseType::Major => "major",
            ReleaseType::Local => "local",
        }
    }

    /// Version component this release increments.
    ///
    /// A local release reports the version the next patch release would get.
    pub fn bump(&self) -> VersionBump {
        match self {
            ReleaseType::Patch | ReleaseType::Local => VersionBump::Patch,
            ReleaseType::Minor => VersionBump::Minor,
            ReleaseType::Major => VersionBump::Major,
        }
    }
}

impl FromStr for ReleaseType {
    type Err = GorrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReleaseType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| GorrError::InvalidReleaseType(s.to_string()))
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `release` invocation: the bump kind plus the arguments handed to the
/// release tool untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub release_type: ReleaseType,
    pub passthrough: Vec<String>,
}

impl ReleaseRequest {
    pub fn new(release_type: ReleaseType, passthrough: Vec<String>) -> Self {
        ReleaseRequest {
            release_type,
            passthrough,
        }
    }

    /// Parse the raw `<type> [args...]` pair from the command line
    pub fn parse(release_type: &str, passthrough: Vec<String>) -> crate::Result<Self> {
        Ok(ReleaseRequest::new(release_type.parse()?, passthrough))
    }

    /// A snapshot run never tags or pushes anything
    pub fn is_snapshot(&self, snapshot_flag: &str) -> bool {
        self.release_type == ReleaseType::Local || self.passthrough.iter().any(|a| a == snapshot_flag)
    }

    /// Arguments for the release tool: base arguments, then passthrough.
    ///
    /// Snapshot runs get the snapshot flag appended unless the caller already
    /// supplied it.
    pub fn tool_args(&self, base_args: &[String], snapshot_flag: &str) -> Vec<String> {
        let mut args: Vec<String> = base_args.to_vec();
        args.extend(self.passthrough.iter().cloned());

        if self.is_snapshot(snapshot_flag) && !self.passthrough.iter().any(|a| a == snapshot_flag) {
            args.push(snapshot_flag.to_string());
        }

        args
    }
}
