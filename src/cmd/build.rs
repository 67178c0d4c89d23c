// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `build`, `package` and `create` commands.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::build::cmake::CmakeTool;
use crate::build::{BuildContext, run_build};
use crate::config::Config;
use crate::error::{ConfigError, PackError, Result};
use crate::package::run_package;
use crate::recipe::{Resolution, resolve};

/// Source, build and package directories of one invocation.
#[derive(Debug, Clone)]
pub struct Layout {
    pub source: PathBuf,
    pub build: PathBuf,
    pub package: PathBuf,
}

impl Layout {
    /// Directories from the `[paths]` section.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if a directory is not configured
    /// and cannot be derived from `paths.prefix`, or a
    /// `ConfigError::InvalidValue` if the layout fails [`Layout::check`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let layout = Self {
            source: config.paths.source()?.to_path_buf(),
            build: config.paths.build()?.to_path_buf(),
            package: config.paths.package()?.to_path_buf(),
        };
        layout.check(config.paths.prefix.as_deref())?;
        Ok(layout)
    }

    /// Rejects layouts where recreating the build or package directory
    /// would delete the source tree, the prefix or the other output.
    ///
    /// Paths are compared lexically after making them absolute, so `""`,
    /// `"."` and `"poco/.."` all name their parent.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn check(&self, prefix: Option<&Path>) -> Result<()> {
        let source = normalize(&self.source)?;
        let prefix = prefix.map(normalize).transpose()?;
        let build = normalize(&self.build)?;
        let package = normalize(&self.package)?;

        for (key, dir, other) in [("build", &build, &package), ("package", &package, &build)] {
            let invalid = |message: String| -> Result<()> {
                Err(ConfigError::InvalidValue {
                    section: "paths".to_string(),
                    key: key.to_string(),
                    message,
                }
                .into())
            };
            if source.starts_with(dir) {
                return invalid(format!(
                    "'{}' is recreated on every run and contains the source tree '{}'",
                    dir.display(),
                    source.display()
                ));
            }
            if let Some(ref prefix) = prefix
                && prefix.starts_with(dir)
            {
                return invalid(format!(
                    "'{}' is recreated on every run and contains the prefix '{}'",
                    dir.display(),
                    prefix.display()
                ));
            }
            if other.starts_with(dir) {
                return invalid(format!(
                    "'{}' is recreated on every run and contains '{}'",
                    dir.display(),
                    other.display()
                ));
            }
        }
        Ok(())
    }

    /// Per-entry sub-directories for the build matrix; the source is shared.
    #[must_use]
    pub fn for_entry(&self, id: &str) -> Self {
        Self {
            source: self.source.clone(),
            build: self.build.join(id),
            package: self.package.join(id),
        }
    }
}

/// Absolute form of `path` with `.` and `..` folded away, without touching
/// the filesystem.
fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Creates the build context and cancels it on Ctrl+C.
#[must_use]
pub fn build_context(config: &Config) -> BuildContext {
    let cancel_token = CancellationToken::new();
    let token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting build...");
            token.cancel();
        }
    });
    BuildContext::new(Arc::new(config.clone()), cancel_token, config.global.dry)
}

/// Runs the build plan with `CMake`.
///
/// # Errors
///
/// Returns the first failing step's error.
pub async fn build_resolution(
    ctx: &BuildContext,
    resolution: &Resolution,
    source: &Path,
    build: &Path,
) -> Result<()> {
    let tool = CmakeTool::from_context(ctx, &resolution.settings, source, build)?;
    run_build(ctx, &tool, resolution, build).await
}

fn resolve_config(config: &Config) -> Result<Resolution> {
    Ok(resolve(&config.options, &config.settings).map_err(PackError::from)?)
}

/// Handler for `build`.
///
/// # Errors
///
/// Returns an error if the paths are missing, the settings are unsupported
/// or a build step fails.
pub async fn run_build_command(config: &Config) -> Result<()> {
    let layout = Layout::from_config(config)?;
    let resolution = resolve_config(config)?;
    let ctx = build_context(config);
    build_resolution(&ctx, &resolution, &layout.source, &layout.build).await
}

/// Handler for `package`.
///
/// # Errors
///
/// Returns an error if the paths are missing, the settings are unsupported
/// or packaging fails.
pub async fn run_package_command(config: &Config) -> Result<()> {
    let layout = Layout::from_config(config)?;
    let resolution = resolve_config(config)?;
    let ctx = build_context(config);
    let report = run_package(&ctx, &resolution, &layout.source, &layout.build, &layout.package).await?;
    tracing::debug!(files = report.files.len(), "package written");
    Ok(())
}

/// Handler for `create`: build, then package.
///
/// # Errors
///
/// Returns the first build or packaging error; nothing is packaged after a
/// failed build.
pub async fn run_create_command(config: &Config) -> Result<()> {
    let layout = Layout::from_config(config)?;
    let resolution = resolve_config(config)?;
    let ctx = build_context(config);
    create(&ctx, &resolution, &layout).await
}

/// Builds and packages one resolution.
///
/// # Errors
///
/// Returns the first build or packaging error.
pub async fn create(ctx: &BuildContext, resolution: &Resolution, layout: &Layout) -> Result<()> {
    build_resolution(ctx, resolution, &layout.source, &layout.build).await?;
    run_package(ctx, resolution, &layout.source, &layout.build, &layout.package).await?;
    Ok(())
}
