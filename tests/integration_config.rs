// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;
use tempfile::TempDir;
use wam_rs::config::Config;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_minimal() {
    let toml = r#"
instances = ["/games/wow"]
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.instances, vec![PathBuf::from("/games/wow")]);
    // Untouched sections keep their defaults.
    assert_eq!(config.global.output_log_level.as_u8(), 3);
    assert_eq!(config.global.file_log_level.as_u8(), 5);
    assert_eq!(config.git.remote, "origin");
}

#[test]
fn config_parse_global_section() {
    let toml = r#"
[global]
output_log_level = 1
file_log_level = 4
log_file = "logs/wam.log"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level.as_u8(), 1);
    assert_eq!(config.global.file_log_level.as_u8(), 4);
    assert_eq!(
        config.global.log_file,
        Some(PathBuf::from("logs/wam.log"))
    );
    assert!(config.instances.is_empty());
}

#[test]
fn config_parse_git_section() {
    let toml = r#"
[git]
remote = "upstream"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.git.remote, "upstream");
}

#[test]
fn config_rejects_unknown_section() {
    let toml = r"
[favorites]
instance = 2
";
    assert!(Config::parse(toml).is_err());
}

// =============================================================================
// Layered sources
// =============================================================================

#[test]
fn config_later_file_overrides_earlier() {
    let dir = temp_dir();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&base, "[git]\nremote = \"origin\"\n[global]\noutput_log_level = 3\n").unwrap();
    std::fs::write(&local, "[git]\nremote = \"upstream\"\n").unwrap();

    let config = Config::builder()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();

    assert_eq!(config.git.remote, "upstream", "later file wins");
    assert_eq!(config.global.output_log_level.as_u8(), 3, "base kept");
}

#[test]
fn config_missing_required_file_fails() {
    let dir = temp_dir();
    let result = Config::builder()
        .add_toml_file(dir.path().join("nope.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_is_fine() {
    let dir = temp_dir();
    let config = Config::builder()
        .add_toml_file_optional(dir.path().join("nope.toml"))
        .build()
        .unwrap();
    assert_eq!(config.git.remote, "origin");
}

// =============================================================================
// Write-back round trip
// =============================================================================

#[test]
fn config_store_round_trips_instances() {
    let dir = temp_dir();
    let path = dir.path().join("wam").join("config.toml");

    let mut config = Config::default();
    config.instances.push(PathBuf::from("/games/wow"));
    config.instances.push(PathBuf::from("/games/wow-classic"));
    config.store(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.instances, config.instances);
}

#[test]
fn config_store_empty_registry_writes_empty_file() {
    let dir = temp_dir();
    let path = dir.path().join("config.toml");

    Config::default().store(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

    // An empty file loads back as pure defaults.
    let reloaded = Config::from_file(&path).unwrap();
    assert!(reloaded.instances.is_empty());
}
