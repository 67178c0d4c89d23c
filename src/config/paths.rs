// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! prefix/
//!   poco/      (source)
//!   build/
//!   package/
//! ```
//!
//! All paths are optional and resolved from `prefix` if not set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Source, build and package directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Main prefix (all other paths relative to this).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    /// POCO source tree (default: prefix/poco).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Build directory (default: prefix/build).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<PathBuf>,
    /// Package output directory (default: prefix/package).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PathBuf>,
}

fn missing(key: &str) -> anyhow::Error {
    ConfigError::MissingKey {
        section: "paths".to_string(),
        key: key.to_string(),
    }
    .into()
}

impl PathsConfig {
    /// Resolve all relative paths against prefix and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the `prefix` path is not set.
    pub fn resolve(&mut self) -> Result<()> {
        let prefix = self.prefix.clone().ok_or_else(|| missing("prefix"))?;

        let resolve = |path: &mut Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(prefix.join(p.clone()));
            }
            None => {
                *path = Some(prefix.join(default));
            }
            _ => {}
        };

        resolve(&mut self.source, "poco");
        resolve(&mut self.build, "build");
        resolve(&mut self.package, "package");

        Ok(())
    }

    /// Get the prefix path, returning an error if not set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the `prefix` path is not set.
    pub fn prefix(&self) -> Result<&Path> {
        self.prefix.as_deref().ok_or_else(|| missing("prefix"))
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if neither `source` nor `prefix` is set.
    pub fn source(&self) -> Result<&Path> {
        self.source.as_deref().ok_or_else(|| missing("source"))
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if neither `build` nor `prefix` is set.
    pub fn build(&self) -> Result<&Path> {
        self.build.as_deref().ok_or_else(|| missing("build"))
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if neither `package` nor `prefix` is set.
    pub fn package(&self) -> Result<&Path> {
        self.package.as_deref().ok_or_else(|| missing("package"))
    }
}
