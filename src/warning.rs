use std::fmt;

/// Non-fatal conditions reported to the user while releasing or rolling back.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// No tag is reachable from HEAD, so the default version is assumed
    NoTagFound { default_version: String },
    /// Fetching tags failed; local tags are used as-is
    TagFetchFailed { remote: String, reason: String },
    /// A local tag with the next version's name already existed and is recreated
    TagRecreated { tag: String },
    /// The branch reached the remote but the tag did not
    TagNotPushed { tag: String, remote: String },
    /// `unrelease` deletes tags other people may already depend on
    UnsafeRollback,
    /// Remote tags could not be listed
    RemoteTagsUnavailable { remote: String, reason: String },
    /// Latest local and remote release tags differ
    TagMismatch {
        local: String,
        remote: Option<String>,
    },
    /// The local tag is gone but the remote one could not be deleted
    RemoteTagDeleteFailed {
        tag: String,
        remote: String,
        reason: String,
    },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::NoTagFound { default_version } => {
                write!(f, "No version tag found, starting from {}", default_version)
            }
            ReleaseWarning::TagFetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from '{}': {}. Using local tags.",
                    remote, reason
                )
            }
            ReleaseWarning::TagRecreated { tag } => {
                write!(f, "Local tag '{}' already exists and will be recreated", tag)
            }
            ReleaseWarning::TagNotPushed { tag, remote } => {
                write!(
                    f,
                    "Branch was pushed but tag '{}' did not reach '{}'. Push it manually with: git push {} {}",
                    tag, remote, remote, tag
                )
            }
            ReleaseWarning::UnsafeRollback => {
                write!(
                    f,
                    "unrelease deletes published tags and build output; do not use it on shared or production repositories"
                )
            }
            ReleaseWarning::RemoteTagsUnavailable { remote, reason } => {
                write!(f, "Could not list tags on '{}': {}", remote, reason)
            }
            ReleaseWarning::TagMismatch { local, remote } => match remote {
                Some(remote) => write!(
                    f,
                    "Latest local tag '{}' does not match latest remote tag '{}'",
                    local, remote
                ),
                None => write!(
                    f,
                    "Latest local tag '{}' has no release tag counterpart on the remote",
                    local
                ),
            },
            ReleaseWarning::RemoteTagDeleteFailed {
                tag,
                remote,
                reason,
            } => {
                write!(
                    f,
                    "Local tag '{}' was deleted but removing it from '{}' failed: {}",
                    tag, remote, reason
                )
            }
        }
    }
}
