// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for pocopack.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (host settings, recipe option defaults)
//! 2. pocopack.toml (cwd, optional)
//! 3. --ini files
//! 4. POCOPACK_* env vars
//! 5. CLI overrides (-o, -s, --set, flags)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! POCOPACK_GLOBAL__DRY=true            → global.dry = true
//! POCOPACK_OPTIONS__ENABLE_PDF=true    → options.enable_pdf = true
//! POCOPACK_SETTINGS__COMPILER=clang    → settings.compiler = "clang"
//! ```
//!
//! Sections are separated by `__` because option names contain `_`.

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{PackError, Result};
use crate::recipe::options::Options;
use crate::recipe::settings::Settings;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{CmakeConfig, GlobalConfig, MatrixConfig, ToolsConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Recipe options; unlisted options keep their defaults.
    pub options: Options,
    /// Target platform and compiler.
    pub settings: Settings,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// `CMake` options.
    pub cmake: CmakeConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// Build matrix axes.
    pub matrix: MatrixConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pocopack::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("ci/linux.toml")
    ///     .add_toml_file_optional("pocopack.toml")
    ///     .with_env_prefix("POCOPACK")
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
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings combination is unsupported or path
    /// resolution fails.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.settings.validate().map_err(PackError::from)?;
        if self.paths.prefix.is_some() {
            self.paths.resolve()?;
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_recipe_options(&mut options);
        self.format_settings(&mut options);
        self.format_paths_options(&mut options);
        self.format_cmake_options(&mut options);
        self.format_matrix_options(&mut options);
        options.insert("tools.cmake".into(), self.tools.cmake.display().to_string());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(ref log_file) = self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
    }

    fn format_recipe_options(&self, options: &mut BTreeMap<String, String>) {
        for (spec, value) in self.options.iter() {
            options.insert(format!("options.{}", spec.name), value.to_string());
        }
    }

    fn format_settings(&self, options: &mut BTreeMap<String, String>) {
        let settings = &self.settings;
        options.insert("settings.os".into(), settings.os.to_string());
        options.insert("settings.arch".into(), settings.arch.to_string());
        options.insert("settings.compiler".into(), settings.compiler.to_string());
        options.insert(
            "settings.compiler_version".into(),
            settings.compiler_version.clone(),
        );
        if let Some(runtime) = settings.compiler_runtime {
            options.insert("settings.compiler_runtime".into(), runtime.to_string());
        }
        if let Some(libcxx) = settings.compiler_libcxx {
            options.insert("settings.compiler_libcxx".into(), libcxx.to_string());
        }
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        options.insert("paths.prefix".into(), fmt(&self.paths.prefix));
        options.insert("paths.source".into(), fmt(&self.paths.source));
        options.insert("paths.build".into(), fmt(&self.paths.build));
        options.insert("paths.package".into(), fmt(&self.paths.package));
    }

    fn format_cmake_options(&self, options: &mut BTreeMap<String, String>) {
        if let Some(ref generator) = self.cmake.generator {
            options.insert("cmake.generator".into(), generator.clone());
        }
        options.insert("cmake.parallel".into(), self.cmake.parallel.to_string());
    }

    fn format_matrix_options(&self, options: &mut BTreeMap<String, String>) {
        let matrix = &self.matrix;
        let lists = [
            ("matrix.gcc_versions", &matrix.gcc_versions),
            ("matrix.clang_versions", &matrix.clang_versions),
            ("matrix.apple_clang_versions", &matrix.apple_clang_versions),
            ("matrix.visual_versions", &matrix.visual_versions),
        ];
        for (key, values) in lists {
            if !values.is_empty() {
                options.insert(key.into(), values.join(", "));
            }
        }
        if !matrix.archs.is_empty() {
            let archs: Vec<String> = matrix.archs.iter().map(ToString::to_string).collect();
            options.insert("matrix.archs".into(), archs.join(", "));
        }
    }
}
