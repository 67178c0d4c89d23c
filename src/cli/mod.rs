// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for pocopack using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! pocopack [global options] <command>
//! version | options | inis
//! resolve [--json]
//! build | package | create
//! matrix [--execute]
//! ```

pub mod args;
pub mod global;


use crate::cli::args::{MatrixArgs, ResolveArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// POCO C++ Libraries package builder
///
/// Resolves recipe options into CMake definitions, builds Debug and
/// Release, and packages the result.
#[derive(Debug, Parser)]
#[command(
    name = "pocopack",
    author,
    version,
    about = "POCO C++ Libraries package builder",
    long_about = "pocopack Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Configures, builds and packages Poco/1.9.0.\n\n\
                  Invoking `pocopack -d some/prefix create` builds the sources in\n\
                  some/prefix/poco and writes the package to some/prefix/package.\n\
                  See `pocopack <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  By default, pocopack loads `pocopack.toml` from the current directory\n\
                  if it exists. Additional files can be specified with --ini; they are\n\
                  loaded after it and override it. POCOPACK_SECTION__KEY environment\n\
                  variables override files, and -o, -s and --set override everything.\n\
                  Use --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by pocopack.
    Inis,

    /// Prints definitions, build plan, copy rules and consumer info.
    Resolve(ResolveArgs),

    /// Configures and builds Debug and Release.
    Build,

    /// Copies build artifacts into the package and writes its metadata.
    Package,

    /// Builds, then packages.
    Create,

    /// Lists or runs the build matrix.
    Matrix(MatrixArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
