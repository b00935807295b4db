// tests/config_test.rs
use gorr::config::{load_config, Config, LOCAL_CONFIG_FILE};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[release]
tool = "goreleaser-pro"
base_args = ["release", "--clean", "--fail-fast"]
dist_dir = "build/dist"
fetch_tags = false

[git]
remote = "upstream"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.release.tool, "goreleaser-pro");
    assert_eq!(
        config.release.base_args,
        vec!["release", "--clean", "--fail-fast"]
    );
    assert_eq!(config.release.dist_dir, PathBuf::from("build/dist"));
    assert!(!config.release.fetch_tags);
    assert_eq!(config.release.snapshot_flag, "--snapshot");
    assert_eq!(config.release.default_version, "v0.1.0");
    assert_eq!(config.git.remote, "upstream");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("cannot read"));
}

#[test]
fn test_unparsable_file_names_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[release]\nbase_args = \"release\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Configuration error"));
    assert!(msg.contains(&temp_file.path().display().to_string()));
}

#[test]
#[serial]
fn test_discovers_config_in_current_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "[release]\nsnapshot_flag = \"--snapshot=true\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    let config = result.unwrap();
    assert_eq!(config.release.snapshot_flag, "--snapshot=true");
    assert_eq!(config.release.tool, "goreleaser");
}

#[test]
#[serial]
fn test_local_config_wins_over_defaults_only_when_present() {
    let dir = TempDir::new().unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    // Without a local file the user config (if any) or defaults apply; either
    // way the result must be a valid configuration.
    let config = result.unwrap();
    assert!(config.validate().is_ok());
    assert_ne!(Config::default().release.tool, "");
}
