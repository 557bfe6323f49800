// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for wam-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. per-user config.toml (see default_path)
//! 3. --config
//! 4. WAM_* env vars
//! 5. CLI overrides
//! ```
//!
//! # File Layout
//!
//! ```toml
//! [global]
//! output_log_level = 3
//! file_log_level = 5
//!
//! [git]
//! remote = "origin"
//!
//! instances = ["C:/Games/World of Warcraft"]
//! ```
//!
//! The instance list is the part the application writes back; the rest
//! is user-edited only.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{ConfigError, InstanceError, Result, WamResult};
use crate::instance::GameInstance;

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git options.
    pub git: GitConfig,
    /// Game installation root paths.
    pub instances: Vec<PathBuf>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use wam_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("config.toml")
    ///     .with_env_prefix("WAM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid
    /// TOML, or does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not
    /// match the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Per-user configuration file path: `<config dir>/wam/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the platform has no
    /// per-user configuration directory.
    pub fn default_path() -> WamResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("wam").join("config.toml"))
            .ok_or_else(|| ConfigError::NoConfigDir.into())
    }

    /// Classify every configured instance path.
    ///
    /// Invalid paths (no game executable) are skipped with a warning,
    /// never fatal: one broken entry must not take down startup.
    #[must_use]
    pub fn load_instances(&self) -> Vec<GameInstance> {
        self.instances
            .iter()
            .filter_map(
                |path| match GameInstance::classify(path, &self.git.remote) {
                    Ok(instance) => Some(instance),
                    Err(e) => {
                        warn!("skipping configured instance {}: {e}", path.display());
                        None
                    }
                },
            )
            .collect()
    }

    /// Classify the configured instance at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NoSuchInstance`] if `index` is out of
    /// range, or the classification error for an invalid path.
    pub fn instance(&self, index: usize) -> WamResult<GameInstance> {
        let path = self
            .instances
            .get(index)
            .ok_or_else(|| InstanceError::NoSuchInstance {
                index,
                count: self.instances.len(),
            })?;
        GameInstance::classify(path, &self.git.remote)
    }

    /// Register a new instance path after validating it.
    ///
    /// # Errors
    ///
    /// Returns the classification error if `path` is not a game
    /// installation. Registering an already-known path is a no-op.
    pub fn add_instance(&mut self, path: &Path) -> WamResult<()> {
        GameInstance::classify(path, &self.git.remote)?;
        if !self.instances.iter().any(|p| p == path) {
            self.instances.push(path.to_path_buf());
        }
        Ok(())
    }

    /// Remove the instance at `index`, returning its path.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NoSuchInstance`] if `index` is out of range.
    pub fn remove_instance(&mut self, index: usize) -> WamResult<PathBuf> {
        if index >= self.instances.len() {
            return Err(InstanceError::NoSuchInstance {
                index,
                count: self.instances.len(),
            }
            .into());
        }
        Ok(self.instances.remove(index))
    }

    /// Write the configuration to `path`, creating parent directories.
    ///
    /// An empty instance list produces an empty file rather than a
    /// `instances = []` stub.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WriteError`] if serialization or the
    /// filesystem write fails.
    pub fn store(&self, path: &Path) -> WamResult<()> {
        let write_err = |message: String| ConfigError::WriteError {
            path: path.display().to_string(),
            message,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }

        let content = if self.instances.is_empty() {
            String::new()
        } else {
            toml::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|e| write_err(e.to_string()))?;
        Ok(())
    }

    /// Format configuration options for display, deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = vec![
            (
                "global.output_log_level".to_string(),
                self.global.output_log_level.as_u8().to_string(),
            ),
            (
                "global.file_log_level".to_string(),
                self.global.file_log_level.as_u8().to_string(),
            ),
            (
                "global.log_file".to_string(),
                self.global
                    .log_file
                    .as_ref()
                    .map_or_else(String::new, |p| p.display().to_string()),
            ),
            ("git.remote".to_string(), self.git.remote.clone()),
        ];
        for (i, path) in self.instances.iter().enumerate() {
            options.push((format!("instances.{i}"), path.display().to_string()));
        }

        let max_key_len = options.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
