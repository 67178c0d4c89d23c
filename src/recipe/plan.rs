// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build plan: which configure/build steps run, in which order.
//!
//! ```text
//! multi-config                single-config
//!   Configure                   Configure(Debug)
//!   Build(Debug)                Build(Debug)
//!   Build(Release)              PurgeCache
//!                               Configure(Release)
//!                               Build(Release)
//!                               PurgeCache
//! ```

use serde::Serialize;
use std::fmt;

/// Build configuration produced by the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    /// Every build type, in build order.
    pub const ALL: [Self; 2] = [Self::Debug, Self::Release];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the build plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "build_type", rename_all = "snake_case")]
pub enum BuildStep {
    /// Configure the build directory. Single-config tools fix the build
    /// type at configure time.
    Configure(Option<BuildType>),
    /// Build one configuration.
    Build(BuildType),
    /// Remove `CMakeCache.txt` and `CMakeFiles/` so the next configure
    /// starts from a clean cache.
    PurgeCache,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configure(None) => write!(f, "configure"),
            Self::Configure(Some(build_type)) => write!(f, "configure ({build_type})"),
            Self::Build(build_type) => write!(f, "build ({build_type})"),
            Self::PurgeCache => write!(f, "purge cache"),
        }
    }
}

/// Resolves the ordered build steps for Debug and Release.
#[must_use]
pub fn build_plan(multi_config: bool) -> Vec<BuildStep> {
    if multi_config {
        std::iter::once(BuildStep::Configure(None))
            .chain(BuildType::ALL.into_iter().map(BuildStep::Build))
            .collect()
    } else {
        BuildType::ALL
            .into_iter()
            .flat_map(|build_type| {
                [
                    BuildStep::Configure(Some(build_type)),
                    BuildStep::Build(build_type),
                    BuildStep::PurgeCache,
                ]
            })
            .collect()
    }
}
