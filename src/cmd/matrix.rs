// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `matrix` command.

use anyhow::Context;
use tracing::info;

use super::build::{Layout, build_context, create};
use crate::cli::args::MatrixArgs;
use crate::config::Config;
use crate::error::{PackError, Result};
use crate::matrix::{MatrixEntry, build_matrix};
use crate::recipe::resolve;

/// Handler for `matrix`: lists the entries, or builds and packages each one
/// in its own sub-directory, stopping at the first failure.
///
/// # Errors
///
/// Returns an error if the paths are missing or an entry fails.
pub async fn run_matrix_command(args: &MatrixArgs, config: &Config) -> Result<()> {
    let entries = build_matrix(&config.matrix, &config.settings);

    if !args.execute {
        for entry in &entries {
            println!("{entry}");
        }
        return Ok(());
    }

    let layout = Layout::from_config(config)?;
    let ctx = build_context(config);
    let total = entries.len();

    for (index, entry) in entries.iter().enumerate() {
        info!(entry = %entry, "Matrix entry {}/{total}", index + 1);
        run_entry(&ctx, config, entry, &layout)
            .await
            .with_context(|| format!("matrix entry '{entry}' failed"))?;
    }

    info!(entries = total, "Matrix completed");
    Ok(())
}

async fn run_entry(
    ctx: &crate::build::BuildContext,
    config: &Config,
    entry: &MatrixEntry,
    layout: &Layout,
) -> Result<()> {
    let options = entry.options(&config.options).map_err(PackError::from)?;
    let resolution = resolve(&options, &entry.settings).map_err(PackError::from)?;
    create(ctx, &resolution, &layout.for_entry(&entry.id())).await
}
