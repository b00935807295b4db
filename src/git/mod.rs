//! Git operations abstraction layer
//!
//! gorr never touches repository internals: every operation is a call to the
//! `git` command line. The [Repository] trait names the handful of calls the
//! release workflow needs so the workflow can run against either:
//!
//! - [system::SystemGit]: the real `git` binary found on PATH
//! - [mock::MockRepository]: an in-memory stand-in that records every call
//!
//! Workflow code should depend on the trait rather than a concrete type.

pub mod mock;
pub mod system;

pub use mock::MockRepository;
pub use system::SystemGit;

use crate::error::Result;

/// Version-control operations used by the release workflow.
///
/// ## Error Handling
///
/// Failing commands map to [crate::error::GorrError::Command] and keep the
/// command's stderr when it was captured. Commands that talk to a remote stream
/// their output straight to the terminal instead.
pub trait Repository: Send + Sync {
    /// Raw `git status --porcelain` output
    fn status_porcelain(&self) -> Result<String>;

    /// True when nothing is staged, modified or untracked
    fn is_clean(&self) -> Result<bool> {
        Ok(self.status_porcelain()?.trim().is_empty())
    }

    /// Most recent tag reachable from HEAD, as printed by `git describe`
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The tag name, possibly with a describe suffix
    /// * `Ok(None)` - If no tag is reachable
    fn describe_latest_tag(&self) -> Result<Option<String>>;

    /// Whether a local tag with this name exists
    fn tag_exists(&self, tag: &str) -> Result<bool>;

    /// Create a lightweight tag at HEAD
    fn create_tag(&self, tag: &str) -> Result<()>;

    /// Delete a local tag
    fn delete_tag(&self, tag: &str) -> Result<()>;

    /// Push the current branch to its upstream
    fn push_branch(&self) -> Result<()>;

    /// Push one tag to a remote
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// Delete a tag on a remote
    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// Tag names published on a remote
    fn list_remote_tags(&self, remote: &str) -> Result<Vec<String>>;

    /// Fetch tags from a remote
    fn fetch_tags(&self, remote: &str) -> Result<()>;
}

/// Extract tag names from `git ls-remote --tags --refs` output.
///
/// Each line is `<sha>\trefs/tags/<name>`; peeled `^{}` entries are skipped.
pub fn parse_remote_tags(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|reference| reference.strip_prefix("refs/tags/"))
        .filter(|name| !name.ends_with("^{}"))
        .map(str::to_string)
        .collect()
}
