// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{addons, instance as instance_cmd};
use crate::cli::addons::{InstallArgs, UpdateArgs};
use crate::cli::instance::{InstanceArgs, InstanceCommand};
use crate::config::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Create a minimal WoW installation with the given addon folders.
fn game_root(dir: &TempDir, addon_names: &[&str]) -> PathBuf {
    let root = dir.path().join("World of Warcraft");
    let addons_dir = root.join("Interface/AddOns");
    std::fs::create_dir_all(&addons_dir).expect("failed to create AddOns");
    std::fs::write(root.join("WoW.exe"), b"MZ").expect("failed to create marker");
    for name in addon_names {
        std::fs::create_dir(addons_dir.join(name)).expect("failed to create addon");
    }
    root
}

fn config_for(root: &Path) -> Config {
    let mut config = Config::default();
    config.instances.push(root.to_path_buf());
    config
}

#[test]
fn test_list_command_with_local_addons() {
    let dir = temp_dir();
    let root = game_root(&dir, &["Questie", "Blizzard_Calendar"]);
    let config = config_for(&root);

    addons::run_list_command(&config, 0).expect("list should succeed");
}

#[test]
fn test_list_command_rejects_bad_index() {
    let config = Config::default();
    assert!(addons::run_list_command(&config, 0).is_err());
}

#[tokio::test]
async fn test_update_command_unknown_addon() {
    let dir = temp_dir();
    let root = game_root(&dir, &["Questie"]);
    let config = config_for(&root);

    let args = UpdateArgs {
        names: vec!["NoSuchAddon".to_string()],
    };
    let result = addons::run_update_command(&args, &config, 0).await;
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("NoSuchAddon"),
        "error should name the addon, got: {message}"
    );
}

#[tokio::test]
async fn test_update_command_all_non_git_is_up_to_date() {
    let dir = temp_dir();
    let root = game_root(&dir, &["Questie", "WeakAuras"]);
    let config = config_for(&root);

    let args = UpdateArgs::default();
    addons::run_update_command(&args, &config, 0)
        .await
        .expect("nothing to update");
}

#[tokio::test]
async fn test_install_command_rejects_invalid_url() {
    let dir = temp_dir();
    let root = game_root(&dir, &[]);
    let config = config_for(&root);

    let args = InstallArgs {
        name: "WeakAuras".to_string(),
        url: "ftp://example.com/repo.git".to_string(),
    };
    let result = addons::run_install_command(&args, &config, 0).await;
    assert!(result.is_err());
    assert!(
        !root.join("Interface/AddOns/WeakAuras").exists(),
        "rejected install must not create the folder"
    );
}

#[test]
fn test_instance_add_list_remove() {
    let dir = temp_dir();
    let root = game_root(&dir, &[]);
    let store_path = dir.path().join("config.toml");

    // Add writes the config file.
    let args = InstanceArgs {
        command: InstanceCommand::Add { path: root.clone() },
    };
    instance_cmd::run_instance_command(&args, Config::default(), &store_path)
        .expect("add should succeed");
    let stored = Config::from_file(&store_path).expect("stored config should parse");
    assert_eq!(stored.instances, vec![root.clone()]);

    // List never writes.
    let args = InstanceArgs {
        command: InstanceCommand::List,
    };
    instance_cmd::run_instance_command(&args, stored.clone(), &store_path)
        .expect("list should succeed");

    // Remove rewrites; empty registry leaves an empty file.
    let args = InstanceArgs {
        command: InstanceCommand::Remove { index: 0 },
    };
    instance_cmd::run_instance_command(&args, stored, &store_path)
        .expect("remove should succeed");
    let content = std::fs::read_to_string(&store_path).unwrap();
    assert!(content.is_empty(), "expected empty file, got: {content:?}");
}

#[test]
fn test_instance_add_rejects_non_game_directory() {
    let dir = temp_dir();
    let store_path = dir.path().join("config.toml");

    let args = InstanceArgs {
        command: InstanceCommand::Add {
            path: dir.path().join("not-a-game"),
        },
    };
    let result = instance_cmd::run_instance_command(&args, Config::default(), &store_path);
    assert!(result.is_err());
    assert!(!store_path.exists(), "failed add must not write config");
}
