use thiserror::Error;

/// Unified error type for gorr operations
#[derive(Error, Debug)]
pub enum GorrError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid release type '{0}'. Must be one of: patch, minor, major, local")]
    InvalidReleaseType(String),

    #[error("Please commit or stash your working tree before creating a new version")]
    DirtyWorkingTree,

    #[error("Release tool '{tool}' is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("Invalid version tag format '{0}'. Expected format: vx.x.x (e.g., v1.2.3)")]
    InvalidVersionTag(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Command `{command}` failed ({status}){}", format_stderr(.stderr))]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Operation cancelled: {0}")]
    Declined(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Convenience type alias for Results in gorr
pub type Result<T> = std::result::Result<T, GorrError>;

impl GorrError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        GorrError::Usage(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GorrError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GorrError::Tag(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GorrError::Config(msg.into())
    }

    /// Create a declined-confirmation error
    pub fn declined(msg: impl Into<String>) -> Self {
        GorrError::Declined(msg.into())
    }

    /// Create an external command failure, keeping the command's stderr
    pub fn command(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        GorrError::Command {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// True for failures detected before any external command could mutate state
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GorrError::DirtyWorkingTree
                | GorrError::ToolUnavailable { .. }
                | GorrError::InvalidVersionTag(_)
                | GorrError::Version(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GorrError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GorrError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_release_type_lists_choices() {
        let err = GorrError::InvalidReleaseType("huge".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid release type 'huge'. Must be one of: patch, minor, major, local"
        );
    }

    #[test]
    fn test_invalid_version_tag_message() {
        let err = GorrError::InvalidVersionTag("release-7".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'release-7'"));
        assert!(msg.contains("vx.x.x"));
    }

    #[test]
    fn test_command_error_relays_stderr() {
        let err = GorrError::command(
            "git push",
            "exit status: 128",
            "fatal: no upstream configured\n",
        );
        assert_eq!(
            err.to_string(),
            "Command `git push` failed (exit status: 128): fatal: no upstream configured"
        );
    }

    #[test]
    fn test_command_error_without_stderr() {
        let err = GorrError::command("goreleaser release --clean", "exit status: 1", "  ");
        assert_eq!(
            err.to_string(),
            "Command `goreleaser release --clean` failed (exit status: 1)"
        );
    }

    #[test]
    fn test_precondition_classification() {
        assert!(GorrError::DirtyWorkingTree.is_precondition());
        assert!(GorrError::InvalidVersionTag("x".to_string()).is_precondition());
        assert!(GorrError::version("overflow").is_precondition());
        assert!(GorrError::ToolUnavailable {
            tool: "goreleaser".to_string(),
            reason: "not found".to_string(),
        }
        .is_precondition());
        assert!(!GorrError::declined("no").is_precondition());
        assert!(!GorrError::command("git push", "exit status: 1", "").is_precondition());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GorrError::usage("x"), "Usage error"),
            (GorrError::version("x"), "Version parsing error"),
            (GorrError::tag("x"), "Tag error"),
            (GorrError::config("x"), "Configuration error"),
            (GorrError::declined("x"), "Operation cancelled"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
