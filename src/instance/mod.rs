// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game instance entity.
//!
//! ```text
//!   <root>/WoW.exe            (installation marker)
//!   <root>/Interface/AddOns/  (one directory per addon)
//!              |
//!              v
//!        GameInstance
//!     Mutex<Vec<Arc<Addon>>>
//!              |
//!       load_addons(): full replace, skip Blizzard_*
//!              |
//!              v
//!      InstanceObserver::addons_loaded(snapshot)
//! ```
//!
//! One entity per configured installation. The addon collection is the
//! sole registry: every reload rebuilds it wholesale, so observers must
//! drop references to previous [`Addon`] instances.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::addon::Addon;
use crate::error::{InstanceError, WamResult};

/// Executable that marks a directory as a WoW installation.
const GAME_MARKER: &str = "WoW.exe";

/// Addon folder relative to the installation root.
const ADDONS_SUBDIR: &str = "Interface/AddOns";

/// Prefix of first-party addons bundled with the game. These are not
/// user-manageable and never appear in the collection.
const RESERVED_PREFIX: &str = "Blizzard_";

/// Observer protocol for a game instance.
pub trait InstanceObserver: Send + Sync {
    /// The addon collection was rebuilt. `addons` is the complete new
    /// collection; references to addons from earlier loads are stale.
    fn addons_loaded(&self, instance: &GameInstance, addons: &[Arc<Addon>]);
}

/// One WoW installation on disk.
pub struct GameInstance {
    root: PathBuf,
    remote: String,
    addons: Mutex<Vec<Arc<Addon>>>,
    observers: Mutex<Vec<Arc<dyn InstanceObserver>>>,
}

impl std::fmt::Debug for GameInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameInstance")
            .field("root", &self.root)
            .field("addons", &self.addon_count())
            .finish_non_exhaustive()
    }
}

impl GameInstance {
    /// Classify a directory as a game installation.
    ///
    /// The addon collection starts empty; subfolders are not inspected
    /// until [`Self::load_addons`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NotAGameDirectory`] if the marker
    /// executable is absent at `root`.
    pub fn classify(root: &Path, remote: &str) -> WamResult<Self> {
        if !root.join(GAME_MARKER).is_file() {
            return Err(InstanceError::NotAGameDirectory {
                path: root.display().to_string(),
            }
            .into());
        }

        Ok(Self {
            root: root.to_path_buf(),
            remote: remote.to_string(),
            addons: Mutex::new(Vec::new()),
            observers: Mutex::new(Vec::new()),
        })
    }

    /// Installation root directory (identity key).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the addon folder inside this installation.
    #[must_use]
    pub fn addons_dir(&self) -> PathBuf {
        self.root.join(ADDONS_SUBDIR)
    }

    /// Snapshot of the current addon collection.
    ///
    /// # Panics
    ///
    /// Panics if the collection mutex is poisoned.
    #[must_use]
    pub fn addons(&self) -> Vec<Arc<Addon>> {
        self.lock_addons().clone()
    }

    /// Number of addons currently loaded.
    ///
    /// # Panics
    ///
    /// Panics if the collection mutex is poisoned.
    #[must_use]
    pub fn addon_count(&self) -> usize {
        self.lock_addons().len()
    }

    /// Find a loaded addon by name.
    ///
    /// # Panics
    ///
    /// Panics if the collection mutex is poisoned.
    #[must_use]
    pub fn find_addon(&self, name: &str) -> Option<Arc<Addon>> {
        self.lock_addons()
            .iter()
            .find(|a| a.name() == name)
            .cloned()
    }

    /// Register an observer. Idempotent by `Arc` identity.
    ///
    /// # Panics
    ///
    /// Panics if the observer mutex is poisoned.
    pub fn register_observer(&self, observer: Arc<dyn InstanceObserver>) {
        let mut observers = self.lock_observers();
        if !observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Unregister an observer by identity. Unknown observers are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the observer mutex is poisoned.
    pub fn unregister_observer(&self, observer: &Arc<dyn InstanceObserver>) {
        self.lock_observers()
            .retain(|o| !Arc::ptr_eq(o, observer));
    }

    /// Rebuild the addon collection from the filesystem.
    ///
    /// Enumerates immediate subdirectories of `Interface/AddOns`,
    /// skipping first-party `Blizzard_*` folders, and classifies each
    /// remaining one. This is a full replace, not a merge: observers
    /// receive the new collection and must discard old references.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::AddonsDirMissing`] if the addon folder
    /// does not exist, or an I/O error if it cannot be enumerated.
    pub fn load_addons(&self) -> WamResult<()> {
        let addons_dir = self.addons_dir();
        if !addons_dir.is_dir() {
            return Err(InstanceError::AddonsDirMissing {
                path: addons_dir.display().to_string(),
            }
            .into());
        }

        let mut entries: Vec<PathBuf> = std::fs::read_dir(&addons_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        entries.sort_unstable();

        let mut addons = Vec::with_capacity(entries.len());
        for path in entries {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if name.starts_with(RESERVED_PREFIX) {
                debug!("skipping first-party addon '{name}'");
                continue;
            }
            addons.push(Arc::new(Addon::classify(&path, &self.remote)));
        }

        info!(
            "loaded {} addons from {}",
            addons.len(),
            addons_dir.display()
        );

        *self.lock_addons() = addons.clone();

        for observer in self.observer_snapshot() {
            observer.addons_loaded(self, &addons);
        }
        Ok(())
    }

    fn observer_snapshot(&self) -> Vec<Arc<dyn InstanceObserver>> {
        self.lock_observers().clone()
    }

    fn lock_addons(&self) -> std::sync::MutexGuard<'_, Vec<Arc<Addon>>> {
        self.addons.lock().expect("addon collection mutex poisoned")
    }

    fn lock_observers(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn InstanceObserver>>> {
        self.observers
            .lock()
            .expect("instance observer mutex poisoned")
    }
}
