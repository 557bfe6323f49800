// wam-rs: World of Warcraft Addon Manager
//
// SPDX-FileCopyrightText: 2026 wam contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   List | Status | Update | Branches | Switch | Install
//!   Instance | Options | Version
//! ```

use std::process::ExitCode;

use wam_rs::cli::global::GlobalOptions;
use wam_rs::cli::{self, Command};
use wam_rs::cmd::addons::{
    run_branches_command, run_install_command, run_list_command, run_status_command,
    run_switch_command, run_update_command,
};
use wam_rs::cmd::config::run_options_command;
use wam_rs::cmd::instance::run_instance_command;
use wam_rs::config::Config;
use wam_rs::config::loader::ConfigLoader;
use wam_rs::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if let Some(Command::Version) = cli.command {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    // A malformed config file is skipped, not fatal: the run continues
    // with defaults (plus CLI flags) and an empty instance list.
    let config = load_config(&cli.global).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e:#}; continuing with defaults");
        fallback_config(&cli.global)
    });

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

/// Translate the effective configuration into logging settings. CLI
/// flags have already been layered over the file values at load time.
fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let index = cli.global.instance;
    let result = match &cli.command {
        Some(Command::Version) => Ok(()), // handled before config load
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::List) => run_list_command(config, index),
        Some(Command::Status) => run_status_command(config, index).await,
        Some(Command::Update(args)) => run_update_command(args, config, index).await,
        Some(Command::Branches(args)) => run_branches_command(args, config, index).await,
        Some(Command::Switch(args)) => run_switch_command(args, config, index).await,
        Some(Command::Install(args)) => run_install_command(args, config, index).await,
        Some(Command::Instance(args)) => Config::default_path()
            .map_err(anyhow::Error::new)
            .and_then(|path| run_instance_command(args, config.clone(), &path)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config
        && let Ok(path) = Config::default_path()
    {
        loader = loader.add_toml_file_optional(path);
    }
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader
}

fn load_config(global: &GlobalOptions) -> wam_rs::error::Result<Config> {
    let loader = build_config_loader(global).with_env_prefix("WAM");
    global.apply_overrides(loader)?.build()
}

/// Defaults plus CLI flags, ignoring every file source.
fn fallback_config(global: &GlobalOptions) -> Config {
    global
        .apply_overrides(ConfigLoader::new())
        .and_then(ConfigLoader::build)
        .unwrap_or_default()
}
