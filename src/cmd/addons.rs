// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Addon-facing command implementations.
//!
//! Every long-running operation (fetch, reset, checkout, clone) runs on
//! a blocking worker, one per addon, and reports back through the
//! addon's observer protocol. The handlers here only fan out, join, and
//! print.

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::addon::{Addon, AddonObserver, AddonStatus};
use crate::cli::addons::{BranchesArgs, InstallArgs, SwitchArgs, UpdateArgs};
use crate::cmd::load_instance;
use crate::config::Config;
use crate::error::{InstanceError, Result, WamError, WamResult};
use crate::install;
use crate::instance::GameInstance;

/// Observer that reports addon events on the console.
struct ConsoleReporter;

impl AddonObserver for ConsoleReporter {
    fn status_changed(&self, addon: &Addon, status: AddonStatus) {
        tracing::debug!("'{}' is now {status}", addon.name());
    }

    fn version_changed(&self, addon: &Addon, version: Option<&str>) {
        println!(
            "{}: version is now {}",
            addon.name(),
            version.unwrap_or("unknown")
        );
    }

    fn operation_failed(&self, addon: &Addon, error: &WamError) {
        eprintln!("{}: {error}", addon.name());
    }
}

/// Print one line per addon: name, status, declared version, branch.
fn print_addon_table(addons: &[Arc<Addon>]) {
    let name_width = addons
        .iter()
        .map(|a| a.name().len())
        .max()
        .unwrap_or(0)
        .max(5);

    println!("{:<name_width$}  {:<15} {:<12} BRANCH", "NAME", "STATUS", "VERSION");
    for addon in addons {
        println!(
            "{:<name_width$}  {:<15} {:<12} {}",
            addon.name(),
            addon.status().to_string(),
            addon.declared_version().unwrap_or_else(|| "-".to_string()),
            addon.current_branch().unwrap_or_else(|| "-".to_string()),
        );
    }
}

fn find_addon(instance: &GameInstance, name: &str) -> Result<Arc<Addon>> {
    instance.find_addon(name).ok_or_else(|| {
        InstanceError::AddonNotFound {
            name: name.to_string(),
            instance: instance.root().display().to_string(),
        }
        .into()
    })
}

/// Run `op` for every addon on its own blocking worker and wait for
/// all of them. Per-addon failures have already been reported through
/// the observer protocol; the first one is returned.
async fn for_each_addon<F>(addons: Vec<Arc<Addon>>, op: F) -> Result<()>
where
    F: Fn(Arc<Addon>) -> WamResult<()> + Clone + Send + Sync + 'static,
{
    let mut set = JoinSet::new();
    for addon in addons {
        let op = op.clone();
        set.spawn_blocking(move || op(addon));
    }

    let mut errors = Vec::new();
    while let Some(result) = set.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => errors.push(anyhow::Error::new(e)),
            Err(e) => errors.push(anyhow::anyhow!("addon worker panicked: {e}")),
        }
    }

    match errors.into_iter().next() {
        None => Ok(()),
        Some(first) => Err(first),
    }
}

/// Main handler for the list command. Local information only, never
/// touches the network.
///
/// # Errors
///
/// Returns an error if the installation cannot be loaded.
pub fn run_list_command(config: &Config, instance_index: usize) -> Result<()> {
    let instance = load_instance(config, instance_index)?;
    let addons = instance.addons();

    if addons.is_empty() {
        println!("No addons found in {}", instance.addons_dir().display());
        return Ok(());
    }

    // Branch names come from local refs, no fetch involved.
    for addon in &addons {
        if addon.is_git()
            && let Err(e) = addon.reload_branches()
        {
            tracing::warn!("could not read branches of '{}': {e}", addon.name());
        }
    }

    print_addon_table(&addons);
    Ok(())
}

/// Main handler for the status command: fetch every git-managed addon's
/// remote and report who is behind.
///
/// # Errors
///
/// Returns an error if the installation cannot be loaded or any status
/// check fails.
pub async fn run_status_command(config: &Config, instance_index: usize) -> Result<()> {
    let instance = load_instance(config, instance_index)?;
    let addons = instance.addons();

    let reporter: Arc<dyn AddonObserver> = Arc::new(ConsoleReporter);
    for addon in &addons {
        addon.register_observer(reporter.clone());
    }

    let result = for_each_addon(addons.clone(), |addon| {
        addon.refresh_status()?;
        addon.reload_branches()
    })
    .await;

    print_addon_table(&addons);

    let outdated = addons
        .iter()
        .filter(|a| a.status() == AddonStatus::Outdated)
        .count();
    if outdated > 0 {
        println!("\n{outdated} addon(s) can be updated with `wam update`");
    }
    result
}

/// Main handler for the update command.
///
/// With no names, refreshes every addon and updates the outdated ones.
/// With names, updates exactly those addons.
///
/// # Errors
///
/// Returns an error if the installation cannot be loaded, a named addon
/// does not exist, or any update fails.
pub async fn run_update_command(
    args: &UpdateArgs,
    config: &Config,
    instance_index: usize,
) -> Result<()> {
    let instance = load_instance(config, instance_index)?;

    let reporter: Arc<dyn AddonObserver> = Arc::new(ConsoleReporter);
    for addon in &instance.addons() {
        addon.register_observer(reporter.clone());
    }

    let targets: Vec<Arc<Addon>> = if args.names.is_empty() {
        for_each_addon(instance.addons(), |addon| addon.refresh_status()).await?;
        instance
            .addons()
            .into_iter()
            .filter(|a| a.status() == AddonStatus::Outdated)
            .collect()
    } else {
        let mut named = Vec::with_capacity(args.names.len());
        for name in &args.names {
            let addon = find_addon(&instance, name)?;
            if addon.is_git() {
                named.push(addon);
            } else {
                println!("{name}: not git-managed, skipping");
            }
        }
        named
    };

    if targets.is_empty() {
        println!("Everything is up to date");
        return Ok(());
    }

    let names: Vec<String> = targets.iter().map(|a| a.name().to_string()).collect();
    for_each_addon(targets, |addon| addon.apply_update()).await?;

    println!("Updated: {}", names.join(", "));
    Ok(())
}

/// Main handler for the branches command.
///
/// # Errors
///
/// Returns an error if the addon does not exist or the fetch fails.
pub async fn run_branches_command(
    args: &BranchesArgs,
    config: &Config,
    instance_index: usize,
) -> Result<()> {
    let instance = load_instance(config, instance_index)?;
    let addon = find_addon(&instance, &args.name)?;

    if !addon.is_git() {
        println!("{}: not git-managed, no branches", addon.name());
        return Ok(());
    }

    let worker = addon.clone();
    let remote = config.git.remote.clone();
    tokio::task::spawn_blocking(move || -> WamResult<()> {
        crate::git::cmd::fetch(worker.path(), &remote)?;
        worker.reload_branches()
    })
    .await??;

    let current = addon.current_branch();
    for branch in addon.branches() {
        let marker = if Some(branch.as_str()) == current.as_deref() {
            "*"
        } else {
            " "
        };
        println!("{marker} {branch}");
    }
    Ok(())
}

/// Main handler for the switch command.
///
/// # Errors
///
/// Returns an error if the addon does not exist or the checkout fails.
pub async fn run_switch_command(
    args: &SwitchArgs,
    config: &Config,
    instance_index: usize,
) -> Result<()> {
    let instance = load_instance(config, instance_index)?;
    let addon = find_addon(&instance, &args.name)?;

    if !addon.is_git() {
        println!("{}: not git-managed, cannot switch branches", addon.name());
        return Ok(());
    }

    let reporter: Arc<dyn AddonObserver> = Arc::new(ConsoleReporter);
    addon.register_observer(reporter);

    let worker = addon.clone();
    let branch = args.branch.clone();
    tokio::task::spawn_blocking(move || worker.switch_branch(&branch)).await??;

    println!("{} is now on branch {}", addon.name(), args.branch);
    Ok(())
}

/// Main handler for the install command: clone a repository into the
/// installation's addon folder, backing up any existing contents.
///
/// # Errors
///
/// Returns an error if the installation cannot be loaded, the URL is
/// invalid, or the clone fails (prior contents are restored).
pub async fn run_install_command(
    args: &InstallArgs,
    config: &Config,
    instance_index: usize,
) -> Result<()> {
    let instance = config.instance(instance_index)?;
    let target = instance.addons_dir().join(&args.name);
    let url = args.url.clone();

    let clone_target = target.clone();
    tokio::task::spawn_blocking(move || install::install_from_url(&clone_target, &url)).await??;

    // Reclassify the fresh checkout and bring its state up to date,
    // reporting through the observer protocol like every other command.
    let addon = Arc::new(Addon::classify(&target, &config.git.remote));
    let reporter: Arc<dyn AddonObserver> = Arc::new(ConsoleReporter);
    addon.register_observer(reporter);
    let worker = addon.clone();
    tokio::task::spawn_blocking(move || -> WamResult<()> {
        worker.reload_branches()?;
        worker.refresh_status()
    })
    .await??;

    println!(
        "Installed {} ({}, branch {}, version {})",
        addon.name(),
        addon.status(),
        addon.current_branch().unwrap_or_else(|| "-".to_string()),
        addon.declared_version().unwrap_or_else(|| "unknown".to_string()),
    );
    Ok(())
}
