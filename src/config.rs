use crate::domain::tag;
use crate::error::{GorrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "gorr.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".gorr.toml";

/// Represents the complete configuration for gorr.
///
/// Every section and key is optional; missing values fall back to the
/// goreleaser conventions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_tool() -> String {
    "goreleaser".to_string()
}

fn default_base_args() -> Vec<String> {
    vec!["release".to_string(), "--clean".to_string()]
}

fn default_snapshot_flag() -> String {
    "--snapshot".to_string()
}

fn default_version() -> String {
    "v0.1.0".to_string()
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_true() -> bool {
    true
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Settings for the external release tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Release binary, resolved through PATH
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Arguments placed before the passthrough arguments
    #[serde(default = "default_base_args")]
    pub base_args: Vec<String>,

    #[serde(default = "default_snapshot_flag")]
    pub snapshot_flag: String,

    /// Version assumed when the repository has no tag yet
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Build output removed by `unrelease`
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    #[serde(default = "default_true")]
    pub fetch_tags: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tool: default_tool(),
            base_args: default_base_args(),
            snapshot_flag: default_snapshot_flag(),
            default_version: default_version(),
            dist_dir: default_dist_dir(),
            fetch_tags: true,
        }
    }
}

/// Settings for the git collaborator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and check it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| GorrError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every release fail later on.
    pub fn validate(&self) -> Result<()> {
        if self.release.tool.trim().is_empty() {
            return Err(GorrError::config("release.tool must not be empty"));
        }
        if self.release.snapshot_flag.trim().is_empty() {
            return Err(GorrError::config("release.snapshot_flag must not be empty"));
        }
        if !tag::is_valid_version_tag(&self.release.default_version) {
            return Err(GorrError::config(format!(
                "release.default_version '{}' is not a vX.Y.Z tag",
                self.release.default_version
            )));
        }
        if self.git.remote.trim().is_empty() {
            return Err(GorrError::config("git.remote must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gorr.toml` in current directory
/// 3. `.gorr.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(),
    };

    let Some(path) = path else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(&path).map_err(|e| {
        GorrError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;

    Config::from_toml(&text).map_err(|e| match e {
        GorrError::Config(msg) => GorrError::config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
