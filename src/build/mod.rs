// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build driver: runs the resolved build plan against a build tool.
//!
//! ```text
//! run_build(ctx, tool, resolution, build_dir)
//!   recreate build_dir
//!   for step in resolution.build_plan(tool.is_multi_config())
//!     Configure(bt) --> tool.configure(definitions + toolchain)
//!     Build(bt)     --> tool.build(bt)
//!     PurgeCache    --> rm CMakeCache.txt, CMakeFiles/
//! BuildContext: config, cancel token, dry-run
//! ```
//!
//! Every step is awaited before the next one starts; the first failure
//! stops the build.

pub mod cmake;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{BuildError, Result};
use crate::recipe::Resolution;
use crate::recipe::definitions::Definitions;
use crate::recipe::plan::{BuildStep, BuildType};

/// Files and directories removed between single-config passes.
pub const CACHE_ENTRIES: [&str; 2] = ["CMakeCache.txt", "CMakeFiles"];

/// Context provided to build tools during execution.
#[derive(Clone)]
pub struct BuildContext {
    cancel_token: CancellationToken,
    /// When true, tools log what they would do without doing it.
    dry_run: bool,
    config: Arc<Config>,
}

impl BuildContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A build system that can configure and compile the library.
///
/// Implementations run their process through
/// `ProcessBuilder::run_with_cancellation()` and honor `ctx.is_dry_run()`.
pub trait BuildTool: Send + Sync {
    /// Short tool name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether one configured tree can build both Debug and Release.
    fn is_multi_config(&self) -> bool;

    /// Configures the build tree.
    ///
    /// `build_type` is set only for single-config tools.
    fn configure<'a>(
        &'a self,
        ctx: &'a BuildContext,
        definitions: &'a Definitions,
        build_type: Option<BuildType>,
    ) -> BoxFuture<'a, Result<()>>;

    /// Builds one configuration in an already configured tree.
    fn build<'a>(&'a self, ctx: &'a BuildContext, build_type: BuildType)
    -> BoxFuture<'a, Result<()>>;
}

/// Executes the build plan for `resolution` in `build_dir`.
///
/// # Errors
///
/// Returns the first failing step's error. A cancelled context stops the
/// build with [`BuildError::Interrupted`] before the next step starts.
pub async fn run_build(
    ctx: &BuildContext,
    tool: &dyn BuildTool,
    resolution: &Resolution,
    build_dir: &Path,
) -> Result<()> {
    let plan = resolution.build_plan(tool.is_multi_config());
    info!(
        tool = tool.name(),
        multi_config = tool.is_multi_config(),
        steps = plan.len(),
        build = %build_dir.display(),
        "Building {}",
        crate::recipe::RECIPE.reference()
    );

    recreate_dir(ctx, build_dir).await?;

    for step in plan {
        if ctx.is_cancelled() {
            return Err(BuildError::Interrupted {
                tool: tool.name().to_string(),
                step: step.to_string(),
            }
            .into());
        }

        match step {
            BuildStep::Configure(build_type) => {
                let definitions = resolution.configure_definitions(build_type);
                info!(step = %step, "Configuring");
                tool.configure(ctx, &definitions, build_type).await?;
            }
            BuildStep::Build(build_type) => {
                info!("Building {build_type}");
                tool.build(ctx, build_type).await?;
            }
            BuildStep::PurgeCache => purge_cache(ctx, build_dir).await?,
        }
    }

    info!(tool = tool.name(), "Build completed");
    Ok(())
}

/// Removes `dir` if it exists and creates it empty.
///
/// # Errors
///
/// Returns an error if the directory cannot be removed or created.
pub async fn recreate_dir(ctx: &BuildContext, dir: &Path) -> Result<()> {
    if ctx.is_dry_run() {
        info!(dir = %dir.display(), "[dry-run] Would recreate directory");
        return Ok(());
    }

    if fs::try_exists(dir).await.unwrap_or(false) {
        debug!(dir = %dir.display(), "removing directory");
        fs::remove_dir_all(dir)
            .await
            .with_context(|| format!("failed to remove directory {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create directory {}", dir.display()))
}

/// Removes the CMake cache so the next configure starts clean.
///
/// # Errors
///
/// Returns an error if an existing cache entry cannot be removed.
pub async fn purge_cache(ctx: &BuildContext, build_dir: &Path) -> Result<()> {
    if ctx.is_dry_run() {
        info!(build = %build_dir.display(), "[dry-run] Would purge CMake cache");
        return Ok(());
    }

    for entry in CACHE_ENTRIES {
        let path = build_dir.join(entry);
        let Ok(metadata) = fs::symlink_metadata(&path).await else {
            continue;
        };
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        removed.with_context(|| format!("failed to remove {}", path.display()))?;
        debug!(path = %path.display(), "purged");
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;
