use crate::error::{GorrError, Result};
use crate::git::{parse_remote_tags, Repository};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Repository backed by the system `git` binary
pub struct SystemGit {
    repo_path: PathBuf,
}

impl SystemGit {
    /// Use the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        SystemGit {
            repo_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.repo_path
    }

    fn git_cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo_path).args(args);
        cmd
    }

    /// Run git and capture stdout; stderr goes into the error on failure.
    fn capture(&self, args: &[&str]) -> Result<String> {
        let command = display_command(args);
        tracing::debug!(command = %command, "running");

        let output = self
            .git_cmd(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GorrError::command(&command, "could not start", e.to_string()))?;

        if !output.status.success() {
            return Err(GorrError::command(
                command,
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git with stdout/stderr attached to the terminal.
    fn stream(&self, args: &[&str]) -> Result<()> {
        let command = display_command(args);
        tracing::debug!(command = %command, "running");

        let status = self
            .git_cmd(args)
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

fn display_command(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

impl Repository for SystemGit {
    fn status_porcelain(&self) -> Result<String> {
        self.capture(&["status", "--porcelain"])
    }

    fn describe_latest_tag(&self) -> Result<Option<String>> {
        match self.capture(&["describe", "--tags", "--abbrev=0"]) {
            Ok(output) => {
                let tag = output.trim();
                Ok((!tag.is_empty()).then(|| tag.to_string()))
            }
            // git describe fails when nothing is tagged yet
            Err(GorrError::Command { stderr, .. }) => {
                tracing::debug!(stderr = %stderr.trim(), "no reachable tag");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn tag_exists(&self, tag: &str) -> Result<bool> {
        let reference = format!("refs/tags/{}", tag);
        let status = self
            .git_cmd(&["rev-parse", "-q", "--verify", reference.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }

    fn create_tag(&self, tag: &str) -> Result<()> {
        self.capture(&["tag", tag]).map(|_| ())
    }

    fn delete_tag(&self, tag: &str) -> Result<()> {
        self.capture(&["tag", "-d", tag]).map(|_| ())
    }

    fn push_branch(&self) -> Result<()> {
        self.stream(&["push"])
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.stream(&["push", remote, tag])
    }

    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.stream(&["push", "--delete", remote, tag])
    }

    fn list_remote_tags(&self, remote: &str) -> Result<Vec<String>> {
        let output = self.capture(&["ls-remote", "--tags", "--refs", remote])?;
        Ok(parse_remote_tags(&output))
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.capture(&["fetch", "--tags", remote]).map(|_| ())
    }
}
