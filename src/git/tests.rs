// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::git::{cmd, query};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a git repository with an initial commit.
/// Uses shell git for simplicity and to avoid coupling tests to gix internals.
/// Returns the name of the default branch (master or main depending on git config).
fn init_test_repo_with_commit(path: &Path) -> String {
    run_git(&["init", "--quiet"], path);
    run_git(&["config", "user.email", "test@example.com"], path);
    run_git(&["config", "user.name", "Test"], path);
    run_git(
        &["commit", "--allow-empty", "-m", "Initial commit", "--quiet"],
        path,
    );
    run_git(&["branch", "--show-current"], path)
}

/// Add an empty commit to an existing repository.
fn add_commit(path: &Path, message: &str) {
    run_git(&["commit", "--allow-empty", "-m", message, "--quiet"], path);
}

#[test]
fn test_query_current_branch() {
    let repo = temp_dir();
    let branch = init_test_repo_with_commit(repo.path());

    let current = query::current_branch(repo.path()).expect("current_branch should succeed");
    assert_eq!(current.as_deref(), Some(branch.as_str()));
}

#[test]
fn test_query_is_dirty_detects_untracked_file() {
    let repo = temp_dir();
    init_test_repo_with_commit(repo.path());

    assert!(!query::is_dirty(repo.path()).expect("is_dirty should succeed"));

    std::fs::write(repo.path().join("Core.lua"), "-- local edit").expect("failed to write file");
    assert!(query::is_dirty(repo.path()).expect("is_dirty should succeed"));
}

#[test]
fn test_clone_fetch_and_commits_behind() {
    // Local "upstream" repository accessed through a file:// URL.
    let remote = temp_dir();
    let branch = init_test_repo_with_commit(remote.path());
    let remote_url = format!("file://{}", remote.path().display());

    let work = temp_dir();
    let local = work.path().join("SomeAddon");
    cmd::clone(&remote_url, &local).expect("clone should succeed");
    assert!(query::is_git_repo(&local));

    // Nothing new upstream yet.
    cmd::fetch(&local, "origin").expect("fetch should succeed");
    let behind =
        cmd::commits_behind(&local, &branch, "origin").expect("commits_behind should succeed");
    assert_eq!(behind, 0);

    // Publish two commits upstream, fetch, count again.
    add_commit(remote.path(), "Update 1");
    add_commit(remote.path(), "Update 2");
    cmd::fetch(&local, "origin").expect("fetch should succeed");
    let behind =
        cmd::commits_behind(&local, &branch, "origin").expect("commits_behind should succeed");
    assert_eq!(behind, 2);

    // Hard reset onto the remote-tracking branch catches up.
    cmd::hard_reset(&local, &format!("origin/{branch}")).expect("hard_reset should succeed");
    let behind =
        cmd::commits_behind(&local, &branch, "origin").expect("commits_behind should succeed");
    assert_eq!(behind, 0);
}

#[test]
fn test_list_remote_branches_skips_head() {
    let remote = temp_dir();
    let default_branch = init_test_repo_with_commit(remote.path());
    run_git(&["branch", "beta"], remote.path());
    let remote_url = format!("file://{}", remote.path().display());

    let work = temp_dir();
    let local = work.path().join("SomeAddon");
    cmd::clone(&remote_url, &local).expect("clone should succeed");

    let mut branches =
        cmd::list_remote_branches(&local, "origin").expect("list_remote_branches should succeed");
    branches.sort_unstable();

    assert!(branches.contains(&default_branch));
    assert!(branches.contains(&"beta".to_string()));
    assert!(
        !branches.iter().any(|b| b == "HEAD"),
        "origin/HEAD must not appear as a branch: {branches:?}"
    );
}

#[test]
fn test_checkout_force_switches_and_discards() {
    let remote = temp_dir();
    let default_branch = init_test_repo_with_commit(remote.path());
    run_git(&["branch", "beta"], remote.path());
    let remote_url = format!("file://{}", remote.path().display());

    let work = temp_dir();
    let local = work.path().join("SomeAddon");
    cmd::clone(&remote_url, &local).expect("clone should succeed");

    cmd::checkout_force(&local, "beta").expect("checkout should succeed");
    let current = query::current_branch(&local).expect("current_branch should succeed");
    assert_eq!(current.as_deref(), Some("beta"));

    cmd::checkout_force(&local, &default_branch).expect("checkout back should succeed");
    let current = query::current_branch(&local).expect("current_branch should succeed");
    assert_eq!(current.as_deref(), Some(default_branch.as_str()));
}

#[test]
fn test_checkout_force_keeps_unrelated_failure_messages() {
    let remote = temp_dir();
    init_test_repo_with_commit(remote.path());
    run_git(&["branch", "beta"], remote.path());
    let remote_url = format!("file://{}", remote.path().display());

    let work = temp_dir();
    let local = work.path().join("SomeAddon");
    cmd::clone(&remote_url, &local).expect("clone should succeed");

    // A stale lock fails the checkout for a reason that has nothing to
    // do with the branch name; git's own message must survive.
    std::fs::write(local.join(".git/index.lock"), "").expect("failed to write lock");
    let result = cmd::checkout_force(&local, "beta");
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("index.lock"),
        "stderr must be preserved, got: {message}"
    );
    assert!(
        !message.contains("branch not found"),
        "a lock failure is not a missing branch: {message}"
    );
}

#[test]
fn test_checkout_force_unknown_branch_fails() {
    let repo = temp_dir();
    init_test_repo_with_commit(repo.path());

    let result = cmd::checkout_force(repo.path(), "no-such-branch");
    assert!(result.is_err(), "checkout of unknown branch should fail");
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("no-such-branch"),
        "error should name the branch, got: {message}"
    );
}
