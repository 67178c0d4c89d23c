// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --dry             ← Log steps instead of running them
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --destination DIR ← paths.prefix override
//! --generator NAME  ← cmake.generator ($CMAKE_GENERATOR)
//! --set S/K=V       ← Direct config override
//! -o NAME=VALUE     ← options/NAME=VALUE
//! -s KEY=VALUE      ← settings/KEY=VALUE
//!
//! Precedence: CLI flags > -o/-s > --set > env > --ini > pocopack.toml
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Logs every build and copy step instead of running it.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Base directory (contains poco/, build/ and package/).
    #[arg(short = 'd', long = "destination", value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// CMake generator, such as 'Ninja' or 'Visual Studio 15 2017'.
    #[arg(short = 'G', long = "generator", value_name = "NAME", env = "CMAKE_GENERATOR")]
    pub generator: Option<String>,

    /// Sets a recipe option, such as 'shared=true' or 'enable_netssl=true'.
    /// Can be specified multiple times.
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Sets a setting, such as 'compiler=clang' or 'arch=x86'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub settings: Vec<String>,

    /// Sets any configuration value, such as 'cmake/generator=Ninja'.
    /// Can be specified multiple times.
    #[arg(long = "set", value_name = "SECTION/KEY=VALUE", action = clap::ArgAction::Append)]
    pub sets: Vec<String>,

    /// Disables auto loading of pocopack.toml, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `section/key=value` overrides,
    /// lowest precedence first.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.sets.clone();
        overrides.extend(self.options.iter().map(|option| format!("options/{option}")));
        overrides.extend(self.settings.iter().map(|setting| format!("settings/{setting}")));

        if let Some(level) = self.log_level {
            overrides.push(format!("global/output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global/file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global/log_file={}", path.display()));
        }

        if self.dry {
            overrides.push("global/dry=true".to_string());
        }

        if let Some(ref prefix) = self.prefix {
            overrides.push(format!("paths/prefix={}", prefix.display()));
        }

        if let Some(ref generator) = self.generator {
            overrides.push(format!("cmake/generator={generator}"));
        }

        overrides
    }
}
