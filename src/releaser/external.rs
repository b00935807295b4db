use crate::error::{GorrError, Result};
use crate::releaser::{parse_tool_version, Releaser, ToolInfo};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Release tool run as a child process
pub struct ExternalReleaser {
    program: String,
}

impl ExternalReleaser {
    pub fn new(program: impl Into<String>) -> Self {
        ExternalReleaser {
            program: program.into(),
        }
    }

    fn display_command(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Releaser for ExternalReleaser {
    fn program(&self) -> &str {
        &self.program
    }

    fn probe(&self) -> Result<ToolInfo> {
        tracing::debug!(program = %self.program, "probing release tool");

        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GorrError::ToolUnavailable {
                tool: self.program.clone(),
                reason: match e.kind() {
                    ErrorKind::NotFound => "not found on PATH; install it first".to_string(),
                    _ => e.to_string(),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GorrError::ToolUnavailable {
                tool: self.program.clone(),
                reason: format!("`{} --version` failed ({}) {}", self.program, output.status, stderr.trim())
                    .trim_end()
                    .to_string(),
            });
        }

        let version = parse_tool_version(&String::from_utf8_lossy(&output.stdout));
        Ok(ToolInfo {
            program: self.program.clone(),
            version,
        })
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let command = self.display_command(args);
        tracing::debug!(command = %command, "running release tool");

        let status = Command::new(&self.program)
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| GorrError::command(&command, "could not start", e.to_string()))?;

        if !status.success() {
            return Err(GorrError::command(command, status.to_string(), ""));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let releaser = ExternalReleaser::new("goreleaser");
        let args = vec!["release".to_string(), "--clean".to_string()];
        assert_eq!(releaser.display_command(&args), "goreleaser release --clean");
        assert_eq!(releaser.display_command(&[]), "goreleaser");
    }

    #[test]
    fn test_probe_missing_binary() {
        let releaser = ExternalReleaser::new("gorr-test-no-such-release-tool");
        let err = releaser.probe().unwrap_err();
        assert!(err.is_precondition());
        assert!(err.to_string().contains("not found on PATH"));
    }

    #[test]
    fn test_run_missing_binary() {
        let releaser = ExternalReleaser::new("gorr-test-no-such-release-tool");
        let err = releaser.run(&["release".to_string()]).unwrap_err();
        assert!(matches!(err, GorrError::Command { ref command, .. }
            if command == "gorr-test-no-such-release-tool release"));
    }
}
