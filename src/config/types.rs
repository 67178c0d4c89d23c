// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, CmakeConfig, ToolsConfig, MatrixConfig
//!         (+ recipe Options, Settings and PathsConfig)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::recipe::settings::Arch;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log every step instead of running it.
    pub dry: bool,
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; only the console is written when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// CMake-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmakeConfig {
    /// Generator passed with `-G`; CMake picks its default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    /// Pass `--parallel` to build steps.
    pub parallel: bool,
}

impl Default for CmakeConfig {
    fn default() -> Self {
        Self {
            generator: None,
            parallel: true,
        }
    }
}

/// Tool paths configuration.
///
/// An empty path means the tool is looked up in `PATH`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// `CMake` executable.
    pub cmake: PathBuf,
}

/// Build matrix axes.
///
/// Empty lists fall back to the `[settings]` values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
    pub archs: Vec<Arch>,
    pub gcc_versions: Vec<String>,
    pub clang_versions: Vec<String>,
    pub apple_clang_versions: Vec<String>,
    pub visual_versions: Vec<String>,
}

impl MatrixConfig {
    /// Returns true when no compiler versions are configured.
    #[must_use]
    pub fn has_no_compilers(&self) -> bool {
        self.gcc_versions.is_empty()
            && self.clang_versions.is_empty()
            && self.apple_clang_versions.is_empty()
            && self.visual_versions.is_empty()
    }
}
