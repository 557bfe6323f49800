// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Instance registry command implementation.
//!
//! `instance add` and `instance remove` rewrite the per-user config
//! file; `instance list` only reads it.

use std::path::Path;

use crate::cli::instance::{InstanceArgs, InstanceCommand};
use crate::config::Config;
use crate::error::Result;
use crate::instance::GameInstance;

/// Main handler for the instance command group.
///
/// `store_path` is where the updated instance list is written, normally
/// [`Config::default_path`].
///
/// # Errors
///
/// Returns an error if a path fails validation, an index is out of
/// range, or the config file cannot be written.
pub fn run_instance_command(
    args: &InstanceArgs,
    mut config: Config,
    store_path: &Path,
) -> Result<()> {
    match &args.command {
        InstanceCommand::Add { path } => {
            config.add_instance(path)?;
            config.store(store_path)?;
            println!("Registered {}", path.display());
        }
        InstanceCommand::Remove { index } => {
            let removed = config.remove_instance(*index)?;
            config.store(store_path)?;
            println!("Removed {}", removed.display());
        }
        InstanceCommand::List => {
            if config.instances.is_empty() {
                println!("No instances registered. Use `wam instance add <path>`.");
                return Ok(());
            }
            for (index, path) in config.instances.iter().enumerate() {
                let state = match GameInstance::classify(path, &config.git.remote) {
                    Ok(_) => "ok",
                    Err(_) => "invalid",
                };
                println!("{index}. {} [{state}]", path.display());
            }
        }
    }
    Ok(())
}
