// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Addon entity and its observer protocol.
//!
//! ```text
//!               Addon
//!   path / name / is_git (immutable)
//!              |
//!              v
//!     Mutex<AddonState>
//!   status / version / branches
//!              |
//!   compare-then-notify (outside lock)
//!              |
//!              v
//!    Vec<Arc<dyn AddonObserver>>
//!    status_changed / version_changed
//!         operation_failed
//! ```
//!
//! One entity per addon folder under `Interface/AddOns`. All mutable
//! state sits behind a single mutex so worker threads can refresh an
//! addon while the command layer reads it. Observers are keyed by
//! `Arc` identity, never by value.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::error::{GitError, WamError, WamResult};
use crate::git::{cmd, query};
use crate::manifest;

/// Status of an addon's working copy relative to its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddonStatus {
    /// Working copy matches the tip of the tracked remote branch.
    UpToDate,
    /// The tracked remote branch has commits the working copy lacks.
    Outdated,
    /// No version-control metadata; the addon cannot be updated.
    NonGit,
    /// A fetch, reset, or checkout is in flight.
    Loading,
    /// The last remote check failed; the real status is unknown.
    CheckFailed,
}

impl std::fmt::Display for AddonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UpToDate => "up to date",
            Self::Outdated => "outdated",
            Self::NonGit => "not git-managed",
            Self::Loading => "loading",
            Self::CheckFailed => "check failed",
        };
        f.write_str(s)
    }
}

/// Observer protocol for a single addon.
///
/// Callbacks run synchronously on whatever thread produced the
/// transition, so implementations must be cheap and thread-safe.
pub trait AddonObserver: Send + Sync {
    /// The addon's status changed to `status`. Not called when an
    /// operation recomputes the status it already had.
    fn status_changed(&self, addon: &Addon, status: AddonStatus);

    /// The declared manifest version changed (including to/from none).
    fn version_changed(&self, addon: &Addon, version: Option<&str>);

    /// An update, branch switch, or status check failed. The addon has
    /// already been moved to [`AddonStatus::CheckFailed`].
    fn operation_failed(&self, addon: &Addon, error: &WamError) {
        let _ = (addon, error);
    }
}

/// Mutable addon state, guarded by the entity's mutex.
#[derive(Debug, Default)]
struct AddonState {
    status: Option<AddonStatus>,
    version: Option<String>,
    branches: Vec<String>,
    current_branch: Option<String>,
}

/// One addon folder inside a game installation.
pub struct Addon {
    path: PathBuf,
    name: String,
    is_git: bool,
    remote: String,
    state: Mutex<AddonState>,
    observers: Mutex<Vec<Arc<dyn AddonObserver>>>,
}

impl std::fmt::Debug for Addon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Addon")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("is_git", &self.is_git)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl Addon {
    /// Classify a directory as an addon.
    ///
    /// Never fails: a missing or corrupt manifest leaves the declared
    /// version unset, and a folder without `.git` is simply not
    /// git-managed. No network access happens here.
    #[must_use]
    pub fn classify(directory: &Path, remote: &str) -> Self {
        let name = directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_git = query::is_git_repo(directory);
        let version = manifest::declared_version(directory);

        // A git addon is presumed current until the first remote check;
        // Loading is entered only while an operation is in flight.
        let status = if is_git {
            AddonStatus::UpToDate
        } else {
            AddonStatus::NonGit
        };

        debug!("classified addon '{name}': git={is_git}, version={version:?}");

        Self {
            path: directory.to_path_buf(),
            name,
            is_git,
            remote: remote.to_string(),
            state: Mutex::new(AddonState {
                status: Some(status),
                version,
                ..AddonState::default()
            }),
            observers: Mutex::new(Vec::new()),
        }
    }

    // --- Accessors ---

    /// Directory path (identity key).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name (the directory's file name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the addon folder is a git working copy.
    #[must_use]
    pub const fn is_git(&self) -> bool {
        self.is_git
    }

    /// Current status.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn status(&self) -> AddonStatus {
        self.lock_state().status.unwrap_or(AddonStatus::Loading)
    }

    /// Declared manifest version, if any.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn declared_version(&self) -> Option<String> {
        self.lock_state().version.clone()
    }

    /// Remote branch names recorded by the last [`Self::reload_branches`].
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn branches(&self) -> Vec<String> {
        self.lock_state().branches.clone()
    }

    /// Currently checked-out branch, if known.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn current_branch(&self) -> Option<String> {
        self.lock_state().current_branch.clone()
    }

    // --- Observer registration ---

    /// Register an observer. Idempotent by `Arc` identity: registering
    /// the same observer twice still yields one notification per event.
    ///
    /// # Panics
    ///
    /// Panics if the observer mutex is poisoned.
    pub fn register_observer(&self, observer: Arc<dyn AddonObserver>) {
        let mut observers = self.lock_observers();
        if !observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Unregister an observer by identity. Removing an observer that
    /// was never registered is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the observer mutex is poisoned.
    pub fn unregister_observer(&self, observer: &Arc<dyn AddonObserver>) {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|o| !Arc::ptr_eq(o, observer));
        if observers.len() == before {
            debug!("unregister of unknown observer on '{}'", self.name);
        }
    }

    // --- Operations ---

    /// Re-evaluate the addon's status against its upstream.
    ///
    /// Non-git addons are pinned to [`AddonStatus::NonGit`] and never
    /// touch the network. Git addons fetch the configured remote, count
    /// how far the tracked branch has moved ahead, and land on
    /// [`AddonStatus::Outdated`] or [`AddonStatus::UpToDate`]. Blocks on
    /// network I/O; run it on a worker, not the interactive thread.
    ///
    /// # Errors
    ///
    /// A fetch or count failure moves the addon to
    /// [`AddonStatus::CheckFailed`], notifies `operation_failed`, and
    /// returns the underlying error.
    pub fn refresh_status(&self) -> WamResult<()> {
        if !self.is_git {
            self.set_status(AddonStatus::NonGit);
            return Ok(());
        }

        self.set_status(AddonStatus::Loading);

        match self.check_remote() {
            Ok(status) => {
                self.set_status(status);
                Ok(())
            }
            Err(e) => {
                warn!("status check failed for '{}': {e}", self.name);
                self.set_status(AddonStatus::CheckFailed);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Fetch and compare against the tracked remote branch.
    fn check_remote(&self) -> WamResult<AddonStatus> {
        let branch = self.tracked_branch()?;
        cmd::fetch(&self.path, &self.remote)?;
        let behind = cmd::commits_behind(&self.path, &branch, &self.remote)?;

        debug!("'{}' is {behind} commits behind {}/{branch}", self.name, self.remote);
        Ok(if behind > 0 {
            AddonStatus::Outdated
        } else {
            AddonStatus::UpToDate
        })
    }

    /// Hard-reset the working copy onto the tip of the tracked remote
    /// branch, discarding local modifications. Addon folders are not
    /// expected to carry user edits.
    ///
    /// No-op for non-git addons.
    ///
    /// # Errors
    ///
    /// A reset failure moves the addon to [`AddonStatus::CheckFailed`],
    /// notifies `operation_failed`, and returns the underlying error.
    pub fn apply_update(&self) -> WamResult<()> {
        if !self.is_git {
            return Ok(());
        }

        self.set_status(AddonStatus::Loading);

        let result = self.tracked_branch().and_then(|branch| {
            cmd::hard_reset(&self.path, &format!("{}/{branch}", self.remote))
        });

        match result {
            Ok(()) => {
                info!("updated '{}'", self.name);
                self.set_status(AddonStatus::UpToDate);
                self.refresh_declared_version();
                Ok(())
            }
            Err(e) => {
                warn!("update failed for '{}': {e}", self.name);
                self.set_status(AddonStatus::CheckFailed);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    /// Reload the remote branch list and the checked-out branch name.
    ///
    /// Does not notify observers: the branch list is read on demand,
    /// not pushed. No-op for non-git addons.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the ref enumeration or head lookup fails.
    pub fn reload_branches(&self) -> WamResult<()> {
        if !self.is_git {
            return Ok(());
        }

        let branches = cmd::list_remote_branches(&self.path, &self.remote)?;
        let current = query::current_branch(&self.path)?;

        let mut state = self.lock_state();
        state.branches = branches;
        state.current_branch = current;
        Ok(())
    }

    /// Force-checkout `branch`, discarding uncommitted changes first.
    ///
    /// No-op for non-git addons.
    ///
    /// # Errors
    ///
    /// A reset or checkout failure moves the addon to
    /// [`AddonStatus::CheckFailed`], notifies `operation_failed`, and
    /// returns the underlying error.
    pub fn switch_branch(&self, branch: &str) -> WamResult<()> {
        if !self.is_git {
            return Ok(());
        }

        self.set_status(AddonStatus::Loading);

        let result = self.checkout(branch);
        match result {
            Ok(()) => {
                info!("'{}' switched to branch '{branch}'", self.name);
                self.lock_state().current_branch = Some(branch.to_string());
                self.set_status(AddonStatus::UpToDate);
                self.refresh_declared_version();
                Ok(())
            }
            Err(e) => {
                warn!("branch switch failed for '{}': {e}", self.name);
                self.set_status(AddonStatus::CheckFailed);
                self.notify_failure(&e);
                Err(e)
            }
        }
    }

    fn checkout(&self, branch: &str) -> WamResult<()> {
        if query::is_dirty(&self.path)? {
            debug!("discarding local changes in '{}'", self.name);
            cmd::hard_reset(&self.path, "HEAD")?;
        }
        cmd::checkout_force(&self.path, branch)
    }

    /// Re-parse the manifest and notify `version_changed` if the
    /// declared version differs from the stored one, including
    /// transitions to and from "no version known".
    pub fn refresh_declared_version(&self) {
        let version = manifest::declared_version(&self.path);

        let changed = {
            let mut state = self.lock_state();
            if state.version == version {
                false
            } else {
                state.version = version.clone();
                true
            }
        };

        if changed {
            for observer in self.observer_snapshot() {
                observer.version_changed(self, version.as_deref());
            }
        }
    }

    // --- Internals ---

    /// Branch used for remote comparison: the recorded checkout if
    /// known, otherwise resolved from HEAD. Detached HEAD is an error.
    fn tracked_branch(&self) -> WamResult<String> {
        if let Some(branch) = self.lock_state().current_branch.clone() {
            return Ok(branch);
        }
        query::current_branch(&self.path)?.ok_or_else(|| {
            GitError::DetachedHead {
                path: self.path.display().to_string(),
            }
            .into()
        })
    }

    /// Store a new status and notify, unless it equals the current one.
    fn set_status(&self, status: AddonStatus) {
        let changed = {
            let mut state = self.lock_state();
            if state.status == Some(status) {
                false
            } else {
                state.status = Some(status);
                true
            }
        };

        if changed {
            for observer in self.observer_snapshot() {
                observer.status_changed(self, status);
            }
        }
    }

    fn notify_failure(&self, error: &WamError) {
        for observer in self.observer_snapshot() {
            observer.operation_failed(self, error);
        }
    }

    /// Snapshot the observer list so callbacks run outside the lock.
    fn observer_snapshot(&self) -> Vec<Arc<dyn AddonObserver>> {
        self.lock_observers().clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AddonState> {
        self.state.lock().expect("addon state mutex poisoned")
    }

    fn lock_observers(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn AddonObserver>>> {
        self.observers.lock().expect("addon observer mutex poisoned")
    }
}
