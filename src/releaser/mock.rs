use crate::error::{GorrError, Result};
use crate::releaser::{Releaser, ToolInfo};
use std::sync::Mutex;

/// Mock release tool that records the argument lists it was run with
pub struct MockReleaser {
    installed: bool,
    fail_runs: bool,
    runs: Mutex<Vec<Vec<String>>>,
}

impl MockReleaser {
    /// An installed tool whose runs succeed
    pub fn new() -> Self {
        MockReleaser {
            installed: true,
            fail_runs: false,
            runs: Mutex::new(Vec::new()),
        }
    }

    /// A tool whose version probe fails
    pub fn missing() -> Self {
        MockReleaser {
            installed: false,
            ..Self::new()
        }
    }

    /// Make every run exit non-zero
    pub fn failing(mut self) -> Self {
        self.fail_runs = true;
        self
    }

    pub fn runs(&self) -> Vec<Vec<String>> {
        self.runs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MockReleaser {
    fn default() -> Self {
        Self::new()
    }
}

impl Releaser for MockReleaser {
    fn program(&self) -> &str {
        "goreleaser"
    }

    fn probe(&self) -> Result<ToolInfo> {
        if !self.installed {
            return Err(GorrError::ToolUnavailable {
                tool: self.program().to_string(),
                reason: "not found on PATH; install it first".to_string(),
            });
        }
        Ok(ToolInfo {
            program: self.program().to_string(),
            version: Some(semver::Version::new(2, 3, 2)),
        })
    }

    fn run(&self, args: &[String]) -> Result<()> {
        self.runs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(args.to_vec());

        if self.fail_runs {
            return Err(GorrError::command(
                format!("{} {}", self.program(), args.join(" ")),
                "exit status: 1",
                "",
            ));
        }
        Ok(())
    }
}
