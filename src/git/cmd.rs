// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (credential helpers, remotes)
//! ```

use crate::error::WamResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Clone a repository into `dest`.
///
/// # Errors
///
/// Returns a `GitError` if the clone operation fails or the destination path is invalid.
pub fn clone(url: &str, dest: &Path) -> WamResult<()> {
    ShellBackend::clone(url, dest)
}

/// Fetch from remote.
///
/// # Errors
///
/// Returns a `GitError` if the fetch operation fails.
pub fn fetch(repo_path: &Path, remote: &str) -> WamResult<()> {
    ShellBackend::fetch(repo_path, remote)
}

/// Discard local changes and move the work tree to `target`
/// (e.g. `origin/main` to apply a fetched update).
///
/// # Errors
///
/// Returns a `GitError` if the reset operation fails.
pub fn hard_reset(repo_path: &Path, target: &str) -> WamResult<()> {
    ShellBackend::hard_reset(repo_path, target)
}

/// Checkout a branch, throwing away local modifications.
///
/// # Errors
///
/// Returns a `GitError` if the branch does not exist or checkout fails.
pub fn checkout_force(repo_path: &Path, branch: &str) -> WamResult<()> {
    ShellBackend::checkout_force(repo_path, branch)
}

/// List branch names available on `remote`, from remote-tracking refs.
/// `<remote>/HEAD` is skipped and the `<remote>/` prefix stripped.
///
/// # Errors
///
/// Returns a `GitError` if the ref enumeration fails.
pub fn list_remote_branches(repo_path: &Path, remote: &str) -> WamResult<Vec<String>> {
    ShellBackend::list_remote_branches(repo_path, remote)
}

/// Count commits on `<remote>/<branch>` that are not on local `branch`.
/// Zero means the work tree is up to date with the remote.
///
/// # Errors
///
/// Returns a `GitError` if the count fails or produces unparseable output.
pub fn commits_behind(repo_path: &Path, branch: &str, remote: &str) -> WamResult<u64> {
    ShellBackend::commits_behind(repo_path, branch, remote)
}
