// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_file_yields_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn durations_use_humantime_syntax() {
    let config = Config::parse(
        r#"
state_dir = "/var/lib/opctl"
operator_url = "https://wizard.local:61009"
operator_timeout = "2s"
phase_timeout = "1h 30m"
"#,
    )
    .unwrap();

    assert_eq!(config.state_dir, PathBuf::from("/var/lib/opctl"));
    assert_eq!(
        config.operator_url.as_deref(),
        Some("https://wizard.local:61009")
    );
    assert_eq!(config.operator_timeout, Duration::from_secs(2));
    assert_eq!(config.phase_timeout, Duration::from_secs(90 * 60));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(Config::parse("wizard = true").is_err());
}

#[test]
fn derived_store_paths_live_under_state_dir() {
    let config = Config {
        state_dir: PathBuf::from("/state"),
        ..Config::default()
    };
    assert_eq!(config.cluster_dir(), PathBuf::from("/state/cluster"));
    assert_eq!(config.wizard_dir(), PathBuf::from("/state/wizard"));
    assert_eq!(config.update_dir(), PathBuf::from("/state/update"));
    assert_eq!(config.join_dir(), PathBuf::from("/state/join"));
}

#[test]
fn discover_reads_config_from_state_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "phase_timeout = \"10s\"\n").unwrap();

    let config = Config::discover(None, Some(dir.path().to_path_buf())).unwrap();

    assert_eq!(config.phase_timeout, Duration::from_secs(10));
    assert_eq!(config.state_dir, dir.path());
}

#[test]
fn discover_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = Config::discover(None, Some(dir.path().to_path_buf())).unwrap();

    assert_eq!(config.phase_timeout, Config::default().phase_timeout);
    assert_eq!(config.state_dir, dir.path());
}

#[test]
fn explicit_state_dir_overrides_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "state_dir = \"/from/file\"\n").unwrap();

    let from_file = Config::discover(Some(&path), None).unwrap();
    assert_eq!(from_file.state_dir, PathBuf::from("/from/file"));

    let overridden = Config::discover(Some(&path), Some(PathBuf::from("/from/flag"))).unwrap();
    assert_eq!(overridden.state_dir, PathBuf::from("/from/flag"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::discover(Some(&dir.path().join("nope.toml")), None).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
