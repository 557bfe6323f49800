// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)  --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, WamError, WamResult};
use std::path::Path;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if path is the root of a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> WamResult<Option<String>>;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn is_dirty(path: &Path) -> WamResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git operations that modify repository state or talk to a remote.
///
/// These go through shell git for credential-helper compatibility and
/// full CLI semantics. Remote listing and behind-counts also live here
/// because they depend on `fetch` having populated remote-tracking refs.
pub trait GitMutation {
    /// Clone a repository into `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone operation fails or the destination path is invalid.
    fn clone(url: &str, dest: &Path) -> WamResult<()>;

    /// Fetch from remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch operation fails.
    fn fetch(repo_path: &Path, remote: &str) -> WamResult<()>;

    /// Discard local changes and move the work tree to `target`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the reset operation fails.
    fn hard_reset(repo_path: &Path, target: &str) -> WamResult<()>;

    /// Checkout a branch, throwing away local modifications.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout_force(repo_path: &Path, branch: &str) -> WamResult<()>;

    /// List branch names available on `remote` (from remote-tracking refs).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the ref enumeration fails.
    fn list_remote_branches(repo_path: &Path, remote: &str) -> WamResult<Vec<String>>;

    /// Count commits on `<remote>/<branch>` that are not on local `branch`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the count fails or produces unparseable output.
    fn commits_behind(repo_path: &Path, branch: &str, remote: &str) -> WamResult<u64>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides efficient read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        // open (not discover): an addon folder inside a repo-managed
        // parent directory must not count as git-managed itself.
        gix::open(path).is_ok()
    }

    fn current_branch(path: &Path) -> WamResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn is_dirty(path: &Path) -> WamResult<bool> {
        use gix::status::UntrackedFiles;

        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|e| GitError::Gix(GixError::Status(e.to_string())))?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|e| GitError::Gix(GixError::Status(e.to_string())))?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for:
/// - Credential helper and SSH agent integration on fetch/clone
/// - Remote-tracking queries that depend on fetch semantics
/// - Work-tree mutations (reset, checkout)
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> WamResult<String> {
        use std::process::Command;

        if which::which("git").is_err() {
            return Err(GitError::GitNotFound.into());
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitMutation for ShellBackend {
    fn clone(url: &str, dest: &Path) -> WamResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let args = [
            "clone",
            "--quiet",
            "-c",
            "advice.detachedHead=false",
            url,
            dest_str,
        ];

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        Self::git_command(&args, parent).map_err(|e| GitError::CloneFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn fetch(repo_path: &Path, remote: &str) -> WamResult<()> {
        Self::git_command(&["fetch", "--quiet", remote], repo_path)?;
        Ok(())
    }

    fn hard_reset(repo_path: &Path, target: &str) -> WamResult<()> {
        Self::git_command(&["reset", "--hard", "--quiet", target], repo_path)?;
        Ok(())
    }

    fn checkout_force(repo_path: &Path, branch: &str) -> WamResult<()> {
        match Self::git_command(&["checkout", "--force", "--quiet", branch], repo_path) {
            Ok(_) => Ok(()),
            Err(e) => {
                // git reports an unknown ref as an unmatched pathspec;
                // every other failure keeps its stderr.
                if let WamError::Git(ref err) = e
                    && let GitError::CommandFailed { message, .. } = err.as_ref()
                    && message.contains("did not match any")
                {
                    return Err(GitError::BranchNotFound {
                        branch: branch.to_string(),
                    }
                    .into());
                }
                Err(e)
            }
        }
    }

    fn list_remote_branches(repo_path: &Path, remote: &str) -> WamResult<Vec<String>> {
        let refs_prefix = format!("refs/remotes/{remote}");
        let output = Self::git_command(
            &["for-each-ref", "--format=%(refname:short)", &refs_prefix],
            repo_path,
        )?;

        let head_ref = format!("{remote}/HEAD");
        let strip_prefix = format!("{remote}/");
        let branches = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != head_ref)
            .filter_map(|line| line.strip_prefix(&strip_prefix))
            .map(ToString::to_string)
            .collect();
        Ok(branches)
    }

    fn commits_behind(repo_path: &Path, branch: &str, remote: &str) -> WamResult<u64> {
        let range = format!("{branch}..{remote}/{branch}");
        let command = ["rev-list", "--count", &range];
        let output = Self::git_command(&command, repo_path)?;

        output.parse::<u64>().map_err(|_| {
            GitError::UnexpectedOutput {
                command: format!("git {}", command.join(" ")),
                output,
            }
            .into()
        })
    }
}
