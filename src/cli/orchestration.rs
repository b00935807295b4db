//! Release workflow orchestration
//!
//! Each workflow runs its external calls strictly in order and returns a
//! `Result`; deciding the process exit code is left to `main`.
//!
//! Release order:
//! 1. Working tree must be clean
//! 2. Release tool must answer its version probe
//! 3. Resolve the current tag (default when untagged) and validate it
//! 4. Compute the next version
//! 5. Unless snapshot: push branch, then create and push the tag
//! 6. Run the release tool

use std::fs;

use crate::config::Config;
use crate::domain::tag::{self, base_tag};
use crate::domain::{ReleaseRequest, ReleaseType, Version};
use crate::error::{GorrError, Result};
use crate::git::Repository;
use crate::releaser::Releaser;
use crate::ui::{self, Prompt};
use crate::warning::ReleaseWarning;

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Tag the release started from (the default tag when untagged)
    pub previous_tag: String,

    /// Tag of the new version
    pub next_tag: String,

    /// No push or tag was made
    pub snapshot: bool,

    /// The new tag reached the remote
    pub pushed: bool,
}

/// Result of a successful rollback
#[derive(Debug, Clone, PartialEq)]
pub struct UnreleaseOutcome {
    /// Tag removed locally
    pub tag: String,

    /// The tag was also removed from the remote
    pub remote_deleted: bool,

    /// The build output directory existed and was removed
    pub dist_removed: bool,
}

/// Current release tag as resolved from the repository
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentTag {
    /// Tag with any describe suffix removed
    pub tag: String,

    /// No tag was reachable and the configured default was used
    pub bootstrapped: bool,
}

/// Find the current release tag.
///
/// Uses the most recent reachable tag with its describe suffix stripped, or
/// `default_version` when the repository has no tag yet. The result is not
/// validated here.
pub fn resolve_current_tag<R: Repository>(repo: &R, default_version: &str) -> Result<CurrentTag> {
    match repo.describe_latest_tag()? {
        Some(described) if !described.trim().is_empty() => {
            let base = base_tag(&described);
            if base != described.trim() {
                tracing::debug!(described = %described.trim(), base, "stripped describe suffix");
            }
            Ok(CurrentTag {
                tag: base.to_string(),
                bootstrapped: false,
            })
        }
        _ => Ok(CurrentTag {
            tag: default_version.to_string(),
            bootstrapped: true,
        }),
    }
}

/// Version that follows `current` for this kind of release
pub fn next_version(current: Version, release_type: ReleaseType) -> Result<Version> {
    current.bump(release_type.bump())
}

/// Run a `release`.
///
/// Precondition failures (dirty tree, missing tool, malformed tag) return
/// before anything is pushed or tagged. A failed branch push stops before the
/// tag is created. A failed tag push is returned as an error, but the branch
/// push is left in place.
pub fn run_release<R: Repository, T: Releaser>(
    request: &ReleaseRequest,
    repo: &R,
    releaser: &T,
    config: &Config,
) -> Result<ReleaseOutcome> {
    let remote = config.git.remote.as_str();
    let snapshot_flag = config.release.snapshot_flag.as_str();

    ui::display_status("Checking working tree...");
    if !repo.is_clean()? {
        return Err(GorrError::DirtyWorkingTree);
    }

    let tool = releaser.probe()?;
    match &tool.version {
        Some(version) => ui::display_success(&format!("Found {} {}", tool.program, version)),
        None => ui::display_success(&format!("Found {}", tool.program)),
    }

    if config.release.fetch_tags {
        if let Err(e) = repo.fetch_tags(remote) {
            ui::display_warning(&ReleaseWarning::TagFetchFailed {
                remote: remote.to_string(),
                reason: e.to_string(),
            });
        }
    }

    let current = resolve_current_tag(repo, &config.release.default_version)?;
    if current.bootstrapped {
        ui::display_warning(&ReleaseWarning::NoTagFound {
            default_version: current.tag.clone(),
        });
    }

    let current_version = Version::from_tag(&current.tag)?;
    let next_tag = next_version(current_version, request.release_type)?.tag();
    ui::display_version_change(&current.tag, &next_tag);

    let snapshot = request.is_snapshot(snapshot_flag);
    let pushed = if snapshot {
        ui::display_status("Snapshot release: no commits or tags will be pushed.");
        ui::display_status(&format!("Next version that would be pushed: {}", next_tag));
        false
    } else {
        ui::display_status("Pushing changes to remote repository...");
        repo.push_branch()?;

        tag_and_push(repo, remote, &next_tag)?;
        ui::display_success(&format!("Next version pushed: {}", next_tag));
        true
    };

    releaser.run(&request.tool_args(&config.release.base_args, snapshot_flag))?;
    ui::display_success("Release completed successfully!");

    Ok(ReleaseOutcome {
        previous_tag: current.tag,
        next_tag,
        snapshot,
        pushed,
    })
}

/// Create `tag` at HEAD and push it.
///
/// A leftover local tag of the same name (from an interrupted run) is deleted
/// and recreated.
fn tag_and_push<R: Repository>(repo: &R, remote: &str, tag: &str) -> Result<()> {
    if repo.tag_exists(tag)? {
        ui::display_warning(&ReleaseWarning::TagRecreated {
            tag: tag.to_string(),
        });
        repo.delete_tag(tag)?;
    }

    ui::display_status(&format!("Creating tag: {}", tag));
    repo.create_tag(tag)?;

    ui::display_status(&format!("Pushing tag: {} to {}", tag, remote));
    if let Err(e) = repo.push_tag(remote, tag) {
        ui::display_warning(&ReleaseWarning::TagNotPushed {
            tag: tag.to_string(),
            remote: remote.to_string(),
        });
        return Err(e);
    }

    Ok(())
}

/// Run `unrelease`: delete the latest release tag and the build output.
///
/// Asks once before doing anything and a second time when the latest local and
/// remote tags disagree. The local tag deletion is not undone if removing the
/// remote tag fails; that failure is only a warning.
pub fn run_unrelease<R: Repository, P: Prompt>(
    repo: &R,
    prompt: &P,
    config: &Config,
) -> Result<UnreleaseOutcome> {
    let remote = config.git.remote.as_str();

    ui::display_warning(&ReleaseWarning::UnsafeRollback);
    if !prompt.confirm("Delete the latest release tag locally and on the remote?")? {
        return Err(GorrError::declined("unrelease aborted by user"));
    }

    // Deleted by its exact name, so no suffix stripping here.
    let local_tag = match repo.describe_latest_tag()? {
        Some(described) if !described.trim().is_empty() => described.trim().to_string(),
        _ => return Err(GorrError::tag("no local release tag to remove")),
    };

    let remote_tag = match repo.list_remote_tags(remote) {
        Ok(tags) => tag::latest_version_tag(tags.iter().map(String::as_str)).map(|(_, tag)| tag),
        Err(e) => {
            ui::display_warning(&ReleaseWarning::RemoteTagsUnavailable {
                remote: remote.to_string(),
                reason: e.to_string(),
            });
            None
        }
    };

    if remote_tag.as_deref() != Some(local_tag.as_str()) {
        ui::display_warning(&ReleaseWarning::TagMismatch {
            local: local_tag.clone(),
            remote: remote_tag,
        });
        let question = format!("Tags differ. Delete '{}' anyway?", local_tag);
        if !prompt.confirm(&question)? {
            return Err(GorrError::declined("unrelease aborted on tag mismatch"));
        }
    }

    ui::display_status(&format!("Deleting local tag: {}", local_tag));
    repo.delete_tag(&local_tag)?;
    ui::display_success(&format!("Deleted local tag: {}", local_tag));

    let remote_deleted = match repo.delete_remote_tag(remote, &local_tag) {
        Ok(()) => {
            ui::display_success(&format!("Deleted tag {} on {}", local_tag, remote));
            true
        }
        Err(e) => {
            ui::display_warning(&ReleaseWarning::RemoteTagDeleteFailed {
                tag: local_tag.clone(),
                remote: remote.to_string(),
                reason: e.to_string(),
            });
            false
        }
    };

    let dist = &config.release.dist_dir;
    let dist_removed = if dist.exists() {
        fs::remove_dir_all(dist)?;
        ui::display_success(&format!("Removed {}", dist.display()));
        true
    } else {
        ui::display_status(&format!("No {} directory to remove", dist.display()));
        false
    };

    Ok(UnreleaseOutcome {
        tag: local_tag,
        remote_deleted,
        dist_removed,
    })
}

/// Hand every argument to the release tool unchanged
pub fn run_passthrough<T: Releaser>(args: &[String], releaser: &T) -> Result<()> {
    if args.is_empty() {
        return Err(GorrError::usage("nothing to pass to the release tool"));
    }
    releaser.run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_resolve_current_tag_strips_suffix() {
        let repo = MockRepository::new().with_described_tag("v1.0.0-7-g73abd8e");
        let current = resolve_current_tag(&repo, "v0.1.0").unwrap();
        assert_eq!(current.tag, "v1.0.0");
        assert!(!current.bootstrapped);
    }

    #[test]
    fn test_resolve_current_tag_bootstraps() {
        let repo = MockRepository::new();
        let current = resolve_current_tag(&repo, "v0.1.0").unwrap();
        assert_eq!(current.tag, "v0.1.0");
        assert!(current.bootstrapped);
    }

    #[test]
    fn test_resolve_current_tag_blank_output_bootstraps() {
        let repo = MockRepository::new().with_described_tag("\n");
        assert!(resolve_current_tag(&repo, "v0.1.0").unwrap().bootstrapped);
    }

    #[test]
    fn test_next_version() {
        let v = Version::new(1, 2, 3);
        assert_eq!(next_version(v, ReleaseType::Patch).unwrap().tag(), "v1.2.4");
        assert_eq!(next_version(v, ReleaseType::Minor).unwrap().tag(), "v1.3.0");
        assert_eq!(next_version(v, ReleaseType::Major).unwrap().tag(), "v2.0.0");
        assert_eq!(next_version(v, ReleaseType::Local).unwrap().tag(), "v1.2.4");
    }
}
