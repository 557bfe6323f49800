// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the addon-facing commands.

use clap::Args;

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    /// Addons to update. With no names, every outdated addon is updated.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

/// Arguments for the `branches` command.
#[derive(Debug, Clone, Args)]
pub struct BranchesArgs {
    /// Addon whose remote branches to list.
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `switch` command.
#[derive(Debug, Clone, Args)]
pub struct SwitchArgs {
    /// Addon to switch.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Branch to check out. Local modifications are discarded.
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    /// Target addon folder name under Interface/AddOns.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Repository URL (https only). Existing folder contents are
    /// backed up and restored if the clone fails.
    #[arg(value_name = "URL")]
    pub url: String,
}
