// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for wam-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! wam [global options] <command>
//! list
//! status
//! update [names...]
//! branches <name>
//! switch <name> <branch>
//! install <name> <url>
//! instance {add|remove|list}
//! options
//! version
//! ```

pub mod addons;
pub mod global;
pub mod instance;


use crate::cli::addons::{BranchesArgs, InstallArgs, SwitchArgs, UpdateArgs};
use crate::cli::global::GlobalOptions;
use crate::cli::instance::InstanceArgs;
use clap::{Parser, Subcommand};

/// World of Warcraft Addon Manager
///
/// Manages git-checkout addons inside a WoW installation.
#[derive(Debug, Parser)]
#[command(
    name = "wam",
    author,
    version,
    about = "World of Warcraft Addon Manager",
    long_about = "wam-rs Copyright (C) 2026 wam contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Manages the addons of a World of Warcraft installation. Addons\n\
                  that are git checkouts can be checked against their upstream,\n\
                  updated, switched between branches, or freshly installed from a\n\
                  repository URL. See `wam <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, wam reads a per-user config.toml (under the\n\
                  platform's configuration directory, e.g. ~/.config/wam/). Game\n\
                  installations registered with `wam instance add` are stored\n\
                  there. Additional files can be specified with --config; those\n\
                  are loaded after the per-user file and override it. Use\n\
                  --no-default-config to skip the per-user file entirely."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the addons of the selected installation (no network access).
    List,

    /// Checks every git-managed addon against its upstream.
    Status,

    /// Updates addons to the tip of their tracked remote branch.
    Update(UpdateArgs),

    /// Lists the remote branches of an addon.
    Branches(BranchesArgs),

    /// Switches an addon to another branch, discarding local changes.
    Switch(SwitchArgs),

    /// Installs an addon from a repository URL.
    Install(InstallArgs),

    /// Manages the registered game installations.
    Instance(InstanceArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
