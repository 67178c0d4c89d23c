// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command arguments.

use clap::Args;

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ResolveArgs {
    /// Print the resolution as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `matrix` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MatrixArgs {
    /// Build and package every entry instead of listing them.
    /// Stops at the first failing entry.
    #[arg(short = 'x', long)]
    pub execute: bool,
}
