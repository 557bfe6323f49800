// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          WamError (~16 bytes)
//!                 |
//!   +------+-----+------+---------+-----+
//!   |      |     |      |         |     |
//!   v      v     v      v         v     v
//!  Git   Config Instance Install  Io
//!  Box    Box    Box      Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git      Gix, CommandFailed, CloneFailed, DetachedHead
//!   Config   ReadError, ParseError, WriteError, NoConfigDir
//!   Instance NotAGameDirectory, AddonsDirMissing
//!   Install  InvalidUrl, BackupFailed, RestoreFailed
//!
//! All variants boxed => WamError stays pointer-sized.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WamError`].
pub type WamResult<T> = std::result::Result<T, WamError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum WamError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Game instance error.
    #[error("instance error: {0}")]
    Instance(#[from] Box<InstanceError>),

    /// Install-from-URL error.
    #[error("install error: {0}")]
    Install(#[from] Box<InstallError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WamError {
                fn from(err: $error) -> Self {
                    WamError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    InstanceError => Instance,
    InstallError => Install,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// gix has multiple error types that are converted through this enum.
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Failed to prepare or iterate a status check.
    #[error("failed to check repository status: {0}")]
    Status(String),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git executable not found in PATH.
    #[error("git executable not found (not in PATH)")]
    GitNotFound,

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// HEAD is detached, no branch to track.
    #[error("detached HEAD in {path}, no tracked branch")]
    DetachedHead { path: String },

    /// Branch not found.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Unparseable output from a git query.
    #[error("unexpected output from '{command}': {output}")]
    UnexpectedOutput { command: String, output: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}': {message}")]
    WriteError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Per-user configuration directory cannot be determined.
    #[error("cannot determine per-user configuration directory")]
    NoConfigDir,
}

// --- Instance Errors ---

/// Game instance errors.
#[derive(Debug, Error)]
pub enum InstanceError {
    /// Path is not a WoW installation (no marker executable).
    #[error("{path} is not a valid WoW directory (WoW.exe not found)")]
    NotAGameDirectory { path: String },

    /// The addon folder is missing inside the installation.
    #[error("addon folder not found: {path}")]
    AddonsDirMissing { path: String },

    /// No instance registered at the requested index.
    #[error("no game instance at index {index} ({count} configured)")]
    NoSuchInstance { index: usize, count: usize },

    /// Addon name not present in the instance.
    #[error("addon '{name}' not found in {instance}")]
    AddonNotFound { name: String, instance: String },
}

// --- Install Errors ---

/// Install-from-URL errors.
#[derive(Debug, Error)]
pub enum InstallError {
    /// URL failed validation (scheme or host).
    #[error("invalid repository url: {0}")]
    InvalidUrl(String),

    /// Existing addon folder could not be moved to the backup location.
    #[error("failed to back up {path}: {message}")]
    BackupFailed { path: String, message: String },

    /// Backup could not be moved back after a failed clone.
    #[error("failed to restore {path} from backup: {message}")]
    RestoreFailed { path: String, message: String },

    /// The clone step failed; the original folder was restored.
    #[error("clone failed, original contents restored: {0}")]
    CloneFailed(String),
}
