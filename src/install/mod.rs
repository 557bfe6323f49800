// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install-from-URL workflow.
//!
//! ```text
//!   validate url (https only)
//!        |
//!        v
//!   backup: rename <AddOns>/<Name> -> <AddOns>/.wam-backup-*/prior
//!        |
//!        v
//!   git clone <url> <AddOns>/<Name>
//!      |              |
//!      v (ok)         v (err)
//!   drop backup    remove partial clone,
//!                  rename backup -> <AddOns>/<Name>
//! ```
//!
//! The backup/restore pair is the one transactional guarantee in the
//! manager: a failed clone never leaves the addon folder half-written.
//! The hard reset and force checkout elsewhere are intentionally
//! destructive; this path is not.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::error::{InstallError, WamResult};
use crate::git::cmd;

/// Accepts `https://` URLs with a valid host: a dotted domain name,
/// `localhost`, an IPv4 address, or a bracketed IPv6 address, with an
/// optional port and path.
static REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^https://
        (?:
            [a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?
            (?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*
            \.[a-z]{2,}
          | localhost
          | \d{1,3}(?:\.\d{1,3}){3}
          | \[[0-9a-f:]+\]
        )
        (?::\d{1,5})?
        (?:/\S*)?
        $",
    )
    .expect("url pattern is valid")
});

/// Check whether `url` is acceptable for install-from-URL.
#[must_use]
pub fn is_valid_repo_url(url: &str) -> bool {
    REPO_URL.is_match(url)
}

/// Replace `target` with a fresh clone of `url`.
///
/// Existing contents are moved aside first and restored if the clone
/// fails, so the folder is either the new clone or exactly what it was.
///
/// # Errors
///
/// - [`InstallError::InvalidUrl`] if `url` fails validation.
/// - [`InstallError::BackupFailed`] if the existing folder cannot be
///   moved aside (nothing has been modified at this point).
/// - [`InstallError::CloneFailed`] if the clone fails; the original
///   contents have been restored.
/// - [`InstallError::RestoreFailed`] if restoring the backup itself
///   fails; the backup directory is left on disk for manual recovery.
pub fn install_from_url(target: &Path, url: &str) -> WamResult<()> {
    if !is_valid_repo_url(url) {
        return Err(InstallError::InvalidUrl(url.to_string()).into());
    }
    replace_with_clone(target, url)
}

/// The transactional core of [`install_from_url`], without URL
/// validation. Exposed for callers that already hold a vetted URL.
///
/// # Errors
///
/// Same as [`install_from_url`], minus [`InstallError::InvalidUrl`].
pub fn replace_with_clone(target: &Path, url: &str) -> WamResult<()> {
    let backup = if target.exists() {
        Some(back_up(target)?)
    } else {
        None
    };

    match cmd::clone(url, target) {
        Ok(()) => {
            info!("installed {} into {}", url, target.display());
            // Dropping the guard deletes the now-obsolete backup.
            drop(backup);
            Ok(())
        }
        Err(e) => {
            warn!("clone of {url} failed: {e}");
            if let Some(backup) = backup {
                restore(target, backup)?;
            } else if target.exists() {
                std::fs::remove_dir_all(target).map_err(|re| InstallError::RestoreFailed {
                    path: target.display().to_string(),
                    message: re.to_string(),
                })?;
            }
            Err(InstallError::CloneFailed(e.to_string()).into())
        }
    }
}

/// Move the existing addon folder into a fresh temp directory beside
/// it. Staying on the same filesystem keeps the move a cheap rename.
fn back_up(target: &Path) -> WamResult<tempfile::TempDir> {
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let backup = tempfile::Builder::new()
        .prefix(".wam-backup-")
        .tempdir_in(parent)
        .map_err(|e| InstallError::BackupFailed {
            path: target.display().to_string(),
            message: e.to_string(),
        })?;

    std::fs::rename(target, backup.path().join("prior")).map_err(|e| {
        InstallError::BackupFailed {
            path: target.display().to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(backup)
}

/// Put the backed-up contents back after a failed clone. If restoring
/// fails too, the backup directory is kept on disk for manual recovery.
fn restore(target: &Path, backup: tempfile::TempDir) -> WamResult<()> {
    let prior = backup.path().join("prior");
    let result = (|| {
        // The clone may have left a partial directory behind.
        if target.exists() {
            std::fs::remove_dir_all(target)?;
        }
        std::fs::rename(&prior, target)
    })();

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            let kept = backup.keep();
            warn!(
                "could not restore {}; backup kept at {}",
                target.display(),
                kept.display()
            );
            Err(InstallError::RestoreFailed {
                path: target.display().to_string(),
                message: e.to_string(),
            }
            .into())
        }
    }
}
