// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Packager: copies build artifacts into the package layout.
//!
//! ```text
//! run_package(ctx, resolution, source, build, package)
//!   recreate package/
//!   for rule in resolution.copy_rules(source, build)
//!     find_files(rule.src, rule.pattern)   sorted
//!     copy (flat | keep path | symlink)
//!     required && none --> MissingArtifact
//!   verify lib/ provides every debug + release library
//!   write pocopack-info.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::build::{BuildContext, recreate_dir};
use crate::error::{PackageError, Result};
use crate::recipe::layout::CopyRule;
use crate::recipe::libraries::{ConsumerInfo, artifact_provides};
use crate::recipe::options::Options;
use crate::recipe::settings::Settings;
use crate::recipe::{RECIPE, Resolution};
use crate::utility::fs::copy::{copy_file_async, copy_symlink_async};
use crate::utility::fs::walk::{FoundFile, WalkOptions, find_files};

/// Consumer metadata file written at the package root.
pub const INFO_FILE: &str = "pocopack-info.json";

/// Contents of [`INFO_FILE`].
#[derive(Debug, Serialize)]
pub struct PackageInfo<'a> {
    pub reference: String,
    pub settings: &'a Settings,
    pub options: &'a Options,
    #[serde(flatten)]
    pub consumer: &'a ConsumerInfo,
}

impl<'a> PackageInfo<'a> {
    #[must_use]
    pub fn new(resolution: &'a Resolution) -> Self {
        Self {
            reference: RECIPE.reference(),
            settings: &resolution.settings,
            options: &resolution.options,
            consumer: &resolution.consumer,
        }
    }
}

/// Files placed in the package, relative to the package root.
#[derive(Debug, Default)]
pub struct PackageReport {
    pub files: Vec<PathBuf>,
}

/// Destination of `file` under `package_dir` according to `rule`.
fn destination(rule: &CopyRule, package_dir: &Path, file: &Path) -> Result<PathBuf> {
    let relative = if rule.keep_path {
        file.strip_prefix(&rule.src)
            .with_context(|| format!("{} is outside {}", file.display(), rule.src.display()))?
            .to_path_buf()
    } else {
        PathBuf::from(file.file_name().context("matched path has no file name")?)
    };
    Ok(package_dir.join(&rule.dst).join(relative))
}

/// Lists the files a rule matches; a missing source directory matches nothing.
///
/// # Errors
///
/// Returns [`PackageError::MissingArtifact`] when a required rule matches
/// nothing, or an error if the source directory cannot be walked.
pub fn rule_matches(rule: &CopyRule) -> Result<Vec<FoundFile>> {
    let found = if rule.src.is_dir() {
        find_files(&rule.src, rule.pattern, &WalkOptions::for_artifacts(rule.recursive))?
    } else {
        debug!(src = %rule.src.display(), "copy source does not exist");
        Vec::new()
    };

    if rule.required && found.is_empty() {
        return Err(PackageError::MissingArtifact {
            pattern: rule.pattern.to_string(),
            src: rule.src.display().to_string(),
        }
        .into());
    }
    Ok(found)
}

/// Executes one copy rule, returning the created paths.
///
/// # Errors
///
/// Returns an error if a required rule matches nothing or a copy fails.
pub async fn copy_rule(rule: &CopyRule, package_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for file in rule_matches(rule)? {
        let dst = destination(rule, package_dir, file.path())?;
        if rule.symlinks && file.is_symlink() {
            copy_symlink_async(file.path(), &dst).await?;
        } else {
            copy_file_async(file.path(), &dst).await?;
        }
        copied.push(dst);
    }

    debug!(
        pattern = rule.pattern,
        src = %rule.src.display(),
        copied = copied.len(),
        "copy rule done"
    );
    Ok(copied)
}

/// Checks that `lib_dir` provides every debug and release library.
///
/// # Errors
///
/// Returns [`PackageError::MissingLibrary`] for the first library without a
/// matching file.
pub fn verify_libraries(consumer: &ConsumerInfo, lib_dir: &Path) -> Result<()> {
    let file_names: Vec<String> = std::fs::read_dir(lib_dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| entry.file_name().to_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let expected = consumer.debug_libs.iter().chain(&consumer.release_libs);
    for name in expected {
        if !file_names.iter().any(|file| artifact_provides(file, name)) {
            return Err(PackageError::MissingLibrary {
                name: name.clone(),
                dir: lib_dir.display().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Writes [`INFO_FILE`] into `package_dir`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_info(resolution: &Resolution, package_dir: &Path) -> Result<PathBuf> {
    let path = package_dir.join(INFO_FILE);
    let json = serde_json::to_string_pretty(&PackageInfo::new(resolution))?;
    tokio::fs::write(&path, json + "\n")
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Builds the package from the source and build trees.
///
/// # Errors
///
/// Fails on the first copy error, missing required artifact or missing
/// library; the package directory is left as far as it got.
pub async fn run_package(
    ctx: &BuildContext,
    resolution: &Resolution,
    source_dir: &Path,
    build_dir: &Path,
    package_dir: &Path,
) -> Result<PackageReport> {
    info!(package = %package_dir.display(), "Packaging {}", RECIPE.reference());
    let rules = resolution.copy_rules(source_dir, build_dir);
    recreate_dir(ctx, package_dir).await?;

    if ctx.is_dry_run() {
        for rule in &rules {
            let matches = if rule.src.is_dir() {
                find_files(&rule.src, rule.pattern, &WalkOptions::for_artifacts(rule.recursive))?
                    .len()
            } else {
                0
            };
            info!(
                pattern = rule.pattern,
                src = %rule.src.display(),
                dst = %rule.dst.display(),
                matches,
                "[dry-run] Would copy"
            );
        }
        info!(file = INFO_FILE, "[dry-run] Would write package info");
        return Ok(PackageReport::default());
    }

    let mut report = PackageReport::default();
    for rule in &rules {
        for path in copy_rule(rule, package_dir).await? {
            if let Ok(relative) = path.strip_prefix(package_dir) {
                report.files.push(relative.to_path_buf());
            }
        }
    }

    if let Err(e) = verify_libraries(&resolution.consumer, &package_dir.join("lib")) {
        warn!(
            expected = resolution.consumer.debug_libs.len() + resolution.consumer.release_libs.len(),
            "library verification failed"
        );
        return Err(e);
    }

    let info_path = write_info(resolution, package_dir).await?;
    if let Ok(relative) = info_path.strip_prefix(package_dir) {
        report.files.push(relative.to_path_buf());
    }

    info!(files = report.files.len(), "Package completed");
    Ok(report)
}
