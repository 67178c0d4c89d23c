// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns and
//! feeds the resulting overrides through the config loader.

use clap::Parser;
use pocopack::cli::{Cli, Command};
use pocopack::config::loader::ConfigLoader;
use pocopack::logging::{LogConfig, LogLevel};
use pocopack::recipe::settings::{Arch, Compiler, Os};

fn load(cli: &Cli) -> pocopack::config::Config {
    cli.global
        .to_config_overrides()
        .iter()
        .try_fold(ConfigLoader::new(), |loader, spec| loader.set_path(spec))
        .expect("overrides are well formed")
        .build()
        .expect("config builds")
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["pocopack", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_resolve_json() {
    let cli = Cli::try_parse_from(["pocopack", "resolve", "--json"]).unwrap();
    match cli.command {
        Some(Command::Resolve(args)) => assert!(args.json),
        other => panic!("expected resolve, got {other:?}"),
    }
}

#[test]
fn cli_matrix_execute() {
    let cli = Cli::try_parse_from(["pocopack", "matrix", "-x"]).unwrap();
    match cli.command {
        Some(Command::Matrix(args)) => assert!(args.execute),
        other => panic!("expected matrix, got {other:?}"),
    }
}

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["pocopack", "release"]).is_err());
}

// =============================================================================
// Overrides into configuration
// =============================================================================

#[test]
fn cli_options_and_settings_reach_config() {
    let cli = Cli::try_parse_from([
        "pocopack",
        "-o",
        "shared=true",
        "-o",
        "enable_pdf=true",
        "-s",
        "os=Windows",
        "-s",
        "compiler=Visual Studio",
        "-s",
        "arch=x86",
        "create",
    ])
    .unwrap();
    let config = load(&cli);

    assert!(config.options.shared());
    assert!(config.options.enabled("enable_pdf"));
    assert_eq!(config.settings.os, Os::Windows);
    assert_eq!(config.settings.compiler, Compiler::VisualStudio);
    assert_eq!(config.settings.arch, Arch::X86);
    assert_eq!(config.settings.compiler_version, "15");
}

#[test]
fn cli_destination_resolves_paths() {
    let cli = Cli::try_parse_from(["pocopack", "-d", "/work", "--dry", "build"]).unwrap();
    let config = load(&cli);

    assert!(config.global.dry);
    assert_eq!(config.paths.source().unwrap(), std::path::Path::new("/work/poco"));
    assert_eq!(config.paths.build().unwrap(), std::path::Path::new("/work/build"));
    assert_eq!(config.paths.package().unwrap(), std::path::Path::new("/work/package"));
}

#[test]
fn cli_set_is_overridden_by_flags() {
    let cli = Cli::try_parse_from([
        "pocopack",
        "--set",
        "cmake/generator=Unix Makefiles",
        "-G",
        "Ninja",
        "--set",
        "cmake/parallel=false",
        "build",
    ])
    .unwrap();
    let config = load(&cli);

    assert_eq!(config.cmake.generator.as_deref(), Some("Ninja"));
    assert!(!config.cmake.parallel);
}

#[test]
fn cli_log_flags_reach_log_config() {
    let cli = Cli::try_parse_from([
        "pocopack",
        "--set",
        "global/output_log_level=1",
        "-l",
        "4",
        "--log-file",
        "logs/pocopack.log",
        "build",
    ])
    .unwrap();
    let log_config = LogConfig::from(&load(&cli).global);

    assert_eq!(log_config.console_level(), LogLevel::DEBUG);
    assert_eq!(log_config.file_level(), LogLevel::DEBUG);
    assert_eq!(
        log_config.log_file(),
        Some(std::path::Path::new("logs/pocopack.log"))
    );
}

#[test]
fn cli_unknown_option_fails_to_load() {
    let cli = Cli::try_parse_from(["pocopack", "-o", "enable_qt=true", "build"]).unwrap();
    let err = cli
        .global
        .to_config_overrides()
        .iter()
        .try_fold(ConfigLoader::new(), |loader, spec| loader.set_path(spec))
        .unwrap()
        .build()
        .unwrap_err();

    assert!(format!("{err:#}").contains("unknown option 'enable_qt'"));
}
