// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Option-driven configuration resolver for the POCO recipe.
//!
//! ```text
//! Options + Settings
//!        |  validate, drop platform-less options
//!        v
//!   resolve() --> Resolution
//!                  +-- definitions        (option table order)
//!                  +-- build_plan()       (multi / single config)
//!                  +-- copy_rules()       (headers, license, binaries)
//!                  +-- consumer           (libraries, system libs, defines)
//! ```
//!
//! Everything here is pure: no I/O, no process execution.

pub mod definitions;
pub mod layout;
pub mod libraries;
pub mod options;
pub mod plan;
pub mod settings;

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::RecipeError;
use definitions::{Definitions, option_definitions, toolchain_definitions};
use layout::{CopyRule, SslVariant, package_rules};
use libraries::ConsumerInfo;
use options::Options;
use plan::{BuildStep, BuildType, build_plan};
use settings::{Compiler, LinkMode, Settings, Target};

/// Static description of the packaged library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecipeInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub license: &'static str,
    pub url: &'static str,
    pub homepage: &'static str,
    pub description: &'static str,
}

impl RecipeInfo {
    /// `name/version` reference of the package.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

pub const RECIPE: RecipeInfo = RecipeInfo {
    name: "Poco",
    version: "1.9.0",
    license: "Boost Software License 1.0",
    url: "https://github.com/suwei-air/conan-poco",
    homepage: "https://pocoproject.org/",
    description: "The POCO C++ Libraries are powerful cross-platform C++ libraries \
                  for building network- and internet-based applications \
                  that run on desktop, server, mobile, IoT, and embedded systems.",
};

/// Everything derived from one (options, settings) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub settings: Settings,
    /// Options after platform filtering.
    pub options: Options,
    pub target: Target,
    /// Option definitions, in option table order.
    pub definitions: Definitions,
    pub ssl: SslVariant,
    pub consumer: ConsumerInfo,
}

/// Resolves options and settings into the package configuration.
///
/// # Errors
///
/// Returns [`RecipeError::UnsupportedSettings`] when the settings fail validation.
pub fn resolve(options: &Options, settings: &Settings) -> Result<Resolution, RecipeError> {
    settings.validate()?;

    let options = options.for_os(settings.os);
    let target = settings.target(LinkMode::from_shared(options.shared()));
    reject_static_runtime_archives(settings, target)?;
    let definitions = option_definitions(&options);
    info!(definitions = %definitions, "resolved build definitions");

    Ok(Resolution {
        ssl: SslVariant::select(&options, settings.os),
        consumer: ConsumerInfo::resolve(&options, target),
        settings: settings.clone(),
        options,
        target,
        definitions,
    })
}

/// POCO names static archives built against `MT`/`MTd` with an `mt` suffix,
/// which no consumer link name covers.
fn reject_static_runtime_archives(settings: &Settings, target: Target) -> Result<(), RecipeError> {
    match (target.compiler, target.link, settings.compiler_runtime) {
        (Compiler::VisualStudio, LinkMode::Static, Some(runtime)) if runtime.is_static() => {
            Err(RecipeError::UnsupportedSettings {
                message: format!(
                    "static Visual Studio libraries with runtime '{runtime}' are named *mt/*mtd \
                     and cannot be packaged; use runtime MD/MDd or shared=True"
                ),
            })
        }
        _ => Ok(()),
    }
}

impl Resolution {
    /// Option definitions plus toolchain definitions for one configure step.
    #[must_use]
    pub fn configure_definitions(&self, build_type: Option<BuildType>) -> Definitions {
        let mut definitions = self.definitions.clone();
        definitions.extend(&toolchain_definitions(&self.options, &self.settings, build_type));
        definitions
    }

    /// Ordered build steps for a tool.
    #[must_use]
    pub fn build_plan(&self, multi_config: bool) -> Vec<BuildStep> {
        build_plan(multi_config)
    }

    /// Ordered copy rules for the given source and build trees.
    #[must_use]
    pub fn copy_rules(&self, source_dir: &Path, build_dir: &Path) -> Vec<CopyRule> {
        package_rules(&self.options, self.settings.os, source_dir, build_dir)
    }
}
