// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> load Config --> Logging ([global]) --> Command Dispatch
//!   Version | Options | Inis | Resolve | Build | Package | Create | Matrix
//! ```

use std::process::ExitCode;

use pocopack::cli::global::GlobalOptions;
use pocopack::cli::{self, Command};
use pocopack::cmd::build::{run_build_command, run_create_command, run_package_command};
use pocopack::cmd::config::{run_inis_command, run_options_command};
use pocopack::cmd::matrix::run_matrix_command;
use pocopack::cmd::resolve::run_resolve_command;
use pocopack::config::Config;
use pocopack::config::loader::ConfigLoader;
use pocopack::error::{Result, bail_out};
use pocopack::logging::init_logging;
use pocopack::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_INI: &str = "pocopack.toml";
const ENV_PREFIX: &str = "POCOPACK";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Logging comes from [global], which already carries the -l/--log-file
    // overrides; a broken configuration still gets the flags on their own.
    let config = load_config(&cli.global);
    let log_config = config.as_ref().map_or_else(
        |_| build_log_config(&cli.global),
        |config| LogConfig::from(&config.global),
    );
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => build_config_loader(&cli.global).map(|loader| {
            run_inis_command(&loader.format_loaded_files());
        }),
        Some(Command::Resolve(args)) => config.and_then(|config| run_resolve_command(args, &config)),
        Some(Command::Build) => match config {
            Ok(config) => run_build_command(&config).await,
            Err(e) => Err(e),
        },
        Some(Command::Package) => match config {
            Ok(config) => run_package_command(&config).await,
            Err(e) => Err(e),
        },
        Some(Command::Create) => match config {
            Ok(config) => run_create_command(&config).await,
            Err(e) => Err(e),
        },
        Some(Command::Matrix(args)) => match config {
            Ok(config) => run_matrix_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(bail_out("no command specified").into())
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

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for spec in global.to_config_overrides() {
        loader = loader.set_path(&spec)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
