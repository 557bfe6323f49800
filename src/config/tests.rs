// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Config;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Create a minimal WoW installation layout and return its root.
fn game_root(dir: &TempDir, name: &str) -> PathBuf {
    let root = dir.path().join(name);
    std::fs::create_dir_all(root.join("Interface/AddOns")).expect("failed to create AddOns");
    std::fs::write(root.join("WoW.exe"), b"MZ").expect("failed to create marker");
    root
}

#[test]
fn test_parse_empty_yields_defaults() {
    let config = Config::parse("").expect("empty config should parse");
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.global.log_file.is_none());
    assert_eq!(config.git.remote, "origin");
    assert!(config.instances.is_empty());
}

#[test]
fn test_parse_full_file() {
    let config = Config::parse(
        r#"
        [global]
        output_log_level = 2
        file_log_level = 4
        log_file = "wam.log"

        [git]
        remote = "upstream"

        instances = ["/games/wow", "/games/wow-classic"]
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file.as_deref(), Some(Path::new("wam.log")));
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.instances.len(), 2);
}

#[test]
fn test_parse_rejects_out_of_range_log_level() {
    let result = Config::parse("[global]\noutput_log_level = 9\n");
    assert!(result.is_err(), "log level 9 must be rejected");
}

#[test]
fn test_parse_rejects_unknown_fields() {
    let result = Config::parse("[global]\nfavourite_colour = \"mauve\"\n");
    assert!(result.is_err(), "unknown fields must be rejected");
}

#[test]
fn test_store_and_reload_round_trip() {
    let dir = temp_dir();
    let path = dir.path().join("wam").join("config.toml");

    let mut config = Config::default();
    config.git.remote = "upstream".to_string();
    config.instances.push(PathBuf::from("/games/wow"));
    config.store(&path).expect("store should succeed");

    let reloaded = Config::from_file(&path).expect("reload should succeed");
    assert_eq!(reloaded.git.remote, "upstream");
    assert_eq!(reloaded.instances, vec![PathBuf::from("/games/wow")]);
}

#[test]
fn test_store_empty_instance_list_writes_empty_file() {
    let dir = temp_dir();
    let path = dir.path().join("config.toml");

    Config::default().store(&path).expect("store should succeed");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.is_empty(), "expected empty file, got: {content:?}");
}

#[test]
fn test_load_instances_skips_invalid_paths() {
    let dir = temp_dir();
    let valid = game_root(&dir, "World of Warcraft");

    let mut config = Config::default();
    config.instances.push(dir.path().join("not-a-game"));
    config.instances.push(valid.clone());

    let instances = config.load_instances();
    assert_eq!(instances.len(), 1, "invalid path skipped, valid kept");
    assert_eq!(instances[0].root(), valid);
}

#[test]
fn test_instance_index_out_of_range() {
    let config = Config::default();
    let result = config.instance(0);
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("index 0"),
        "error should name the index, got: {message}"
    );
}

#[test]
fn test_add_instance_validates_and_deduplicates() {
    let dir = temp_dir();
    let root = game_root(&dir, "World of Warcraft");

    let mut config = Config::default();
    assert!(config.add_instance(&dir.path().join("nope")).is_err());
    assert!(config.instances.is_empty());

    config.add_instance(&root).expect("valid root accepted");
    config.add_instance(&root).expect("re-adding is a no-op");
    assert_eq!(config.instances.len(), 1);
}

#[test]
fn test_remove_instance() {
    let mut config = Config::default();
    config.instances.push(PathBuf::from("/games/wow"));

    assert!(config.remove_instance(3).is_err());
    let removed = config.remove_instance(0).expect("remove should succeed");
    assert_eq!(removed, PathBuf::from("/games/wow"));
    assert!(config.instances.is_empty());
}

#[test]
fn test_format_options() {
    let mut config = Config::default();
    config.instances.push(PathBuf::from("/games/wow"));

    let options = config.format_options();
    assert_eq!(options.len(), 5);
    assert_eq!(options[0], "global.output_log_level = 3");
    assert!(options[3].starts_with("git.remote"));
    assert!(options[3].ends_with("= origin"));
    assert!(options[4].ends_with("= /games/wow"));

    // Keys are aligned on the longest one.
    let eq_columns: Vec<usize> = options
        .iter()
        .map(|line| line.find(" = ").expect("separator present"))
        .collect();
    assert!(eq_columns.iter().all(|c| *c == eq_columns[0]));
}
