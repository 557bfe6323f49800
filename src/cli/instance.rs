// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `instance` command group.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `instance` command.
#[derive(Debug, Clone, Args)]
pub struct InstanceArgs {
    #[command(subcommand)]
    pub command: InstanceCommand,
}

/// Instance registry subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum InstanceCommand {
    /// Register a game installation root.
    Add {
        /// Installation root directory (must contain WoW.exe).
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Remove a registered installation by index.
    Remove {
        /// Index as shown by `instance list`.
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// List registered installations.
    List,
}
