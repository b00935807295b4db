use crate::error::{GorrError, Result};
use crate::git::Repository;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MockState {
    status: String,
    described: Option<String>,
    local_tags: BTreeSet<String>,
    remote_tags: BTreeSet<String>,
    failing: HashSet<String>,
    calls: Vec<String>,
}

/// Mock repository for testing without running git.
///
/// Every trait call is recorded as `"<operation> <args...>"`, e.g.
/// `"push_tag origin v1.2.4"`, so tests can assert on ordering.
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a clean repository with no tags
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Report pending changes from `status_porcelain`
    pub fn with_dirty_tree(self) -> Self {
        self.lock().status = " M src/main.rs\n?? notes.txt\n".to_string();
        self
    }

    /// Set what `git describe` prints; the tag itself is added to local tags
    pub fn with_described_tag(self, described: impl Into<String>) -> Self {
        let described = described.into();
        {
            let mut state = self.lock();
            let tag = described.trim();
            if !tag.is_empty() {
                state.local_tags.insert(tag.to_string());
            }
            state.described = Some(described);
        }
        self
    }

    /// Add a local tag without making it the described one
    pub fn with_local_tag(self, tag: impl Into<String>) -> Self {
        self.lock().local_tags.insert(tag.into());
        self
    }

    /// Add a tag on the remote
    pub fn with_remote_tag(self, tag: impl Into<String>) -> Self {
        self.lock().remote_tags.insert(tag.into());
        self
    }

    /// Make every call to `operation` fail (e.g. `"push_tag"`)
    pub fn failing_on(self, operation: impl Into<String>) -> Self {
        self.lock().failing.insert(operation.into());
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Names of the operations called so far, in order
    pub fn operations(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.split(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    pub fn local_tags(&self) -> Vec<String> {
        self.lock().local_tags.iter().cloned().collect()
    }

    pub fn remote_tags(&self) -> Vec<String> {
        self.lock().remote_tags.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, operation: &str, args: &[&str]) -> Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        let mut call = operation.to_string();
        for arg in args {
            call.push(' ');
            call.push_str(arg);
        }
        state.calls.push(call.clone());

        if state.failing.contains(operation) {
            return Err(GorrError::command(
                format!("git {}", call),
                "exit status: 1",
                format!("mock failure in {}", operation),
            ));
        }
        Ok(state)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn status_porcelain(&self) -> Result<String> {
        Ok(self.record("status", &[])?.status.clone())
    }

    fn describe_latest_tag(&self) -> Result<Option<String>> {
        Ok(self.record("describe", &[])?.described.clone())
    }

    fn tag_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.record("tag_exists", &[tag])?.local_tags.contains(tag))
    }

    fn create_tag(&self, tag: &str) -> Result<()> {
        let mut state = self.record("create_tag", &[tag])?;
        if !state.local_tags.insert(tag.to_string()) {
            return Err(GorrError::tag(format!("tag '{}' already exists", tag)));
        }
        Ok(())
    }

    fn delete_tag(&self, tag: &str) -> Result<()> {
        let mut state = self.record("delete_tag", &[tag])?;
        if !state.local_tags.remove(tag) {
            return Err(GorrError::tag(format!("tag '{}' not found", tag)));
        }
        Ok(())
    }

    fn push_branch(&self) -> Result<()> {
        self.record("push_branch", &[]).map(|_| ())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        let mut state = self.record("push_tag", &[remote, tag])?;
        state.remote_tags.insert(tag.to_string());
        Ok(())
    }

    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()> {
        let mut state = self.record("delete_remote_tag", &[remote, tag])?;
        state.remote_tags.remove(tag);
        Ok(())
    }

    fn list_remote_tags(&self, remote: &str) -> Result<Vec<String>> {
        let state = self.record("list_remote_tags", &[remote])?;
        Ok(state.remote_tags.iter().cloned().collect())
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.record("fetch_tags", &[remote]).map(|_| ())
    }
}
