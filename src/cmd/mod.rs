// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   addons: list, status, update, branches, switch, install
//!   config: options
//!   instance: add, remove, list
//! ```

pub mod addons;
pub mod config;
pub mod instance;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::instance::GameInstance;

/// Classify the selected installation and load its addon collection.
///
/// # Errors
///
/// Returns an error if the index is out of range, the path is not a
/// game installation, or the addon folder cannot be enumerated.
pub(crate) fn load_instance(config: &Config, index: usize) -> Result<Arc<GameInstance>> {
    let instance = config.instance(index)?;
    instance.load_addons()?;
    Ok(Arc::new(instance))
}
