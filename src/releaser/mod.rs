//! External release tool abstraction
//!
//! gorr only decides *when* to release; packaging, signing and publishing are
//! the release tool's job (goreleaser unless configured otherwise).

pub mod external;
pub mod mock;

pub use external::ExternalReleaser;
pub use mock::MockReleaser;

use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;

/// What the version probe found out about the release tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    /// Binary that answered the probe
    pub program: String,
    /// First semantic version printed by `--version`, if any
    pub version: Option<semver::Version>,
}

/// The release tool gorr hands off to.
pub trait Releaser: Send + Sync {
    /// Binary name, for messages
    fn program(&self) -> &str;

    /// Check the tool is installed and runnable
    ///
    /// # Returns
    /// * `Ok(ToolInfo)` - The tool answered its version probe
    /// * `Err(GorrError::ToolUnavailable)` - Missing from PATH or probe failed
    fn probe(&self) -> Result<ToolInfo>;

    /// Run the tool with `args`, output streamed to the terminal
    fn run(&self, args: &[String]) -> Result<()>;
}

/// Find the first `X.Y.Z[-pre]` in a `--version` banner.
///
/// goreleaser prints an ASCII-art banner followed by `GitVersion: 2.3.2`;
/// other tools print `tool version v1.4.0`.
pub fn parse_tool_version(output: &str) -> Option<semver::Version> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\bv?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?)").expect("tool version pattern is valid")
    });

    re.captures_iter(output)
        .filter_map(|captures| captures.get(1))
        .find_map(|m| semver::Version::parse(m.as_str()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goreleaser_banner() {
        let banner = "  ____       ____      _\n / ___| ___ |  _ \\ ___| | ___  __ _ ___  ___ _ __\n\n\
GitVersion:    2.3.2\nGitCommit:     a1b2c3d\nGoVersion:     go1.23.1\n";
        assert_eq!(
            parse_tool_version(banner),
            Some(semver::Version::new(2, 3, 2))
        );
    }

    #[test]
    fn test_parse_prefixed_version() {
        assert_eq!(
            parse_tool_version("releaser version v1.4.0-rc.1 (linux/amd64)"),
            Some(semver::Version::parse("1.4.0-rc.1").unwrap())
        );
    }

    #[test]
    fn test_parse_no_version() {
        assert_eq!(parse_tool_version("development build"), None);
    }
}
