// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `resolve` command: shows everything derived from the configuration.

use std::path::Path;

use serde::Serialize;

use crate::build::cmake::{is_multi_config_generator, select_generator};
use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::error::{PackError, Result};
use crate::recipe::definitions::Definitions;
use crate::recipe::layout::CopyRule;
use crate::recipe::plan::BuildStep;
use crate::recipe::{RECIPE, Resolution, resolve};

/// One build step with the definitions its configure call receives.
#[derive(Debug, Serialize)]
pub struct PlannedStep {
    #[serde(flatten)]
    pub step: BuildStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Definitions>,
}

/// Output of the `resolve` command.
#[derive(Debug, Serialize)]
pub struct ResolveReport<'a> {
    pub reference: String,
    #[serde(flatten)]
    pub resolution: &'a Resolution,
    pub multi_config: bool,
    pub build_plan: Vec<PlannedStep>,
    pub copy_rules: Vec<CopyRule>,
}

impl<'a> ResolveReport<'a> {
    #[must_use]
    pub fn new(resolution: &'a Resolution, multi_config: bool, source: &Path, build: &Path) -> Self {
        let build_plan = resolution
            .build_plan(multi_config)
            .into_iter()
            .map(|step| PlannedStep {
                definitions: match step {
                    BuildStep::Configure(build_type) => {
                        Some(resolution.configure_definitions(build_type))
                    }
                    BuildStep::Build(_) | BuildStep::PurgeCache => None,
                },
                step,
            })
            .collect();

        Self {
            reference: RECIPE.reference(),
            resolution,
            multi_config,
            build_plan,
            copy_rules: resolution.copy_rules(source, build),
        }
    }

    /// Human-readable report.
    #[must_use]
    pub fn format(&self) -> Vec<String> {
        let resolution = self.resolution;
        let settings = &resolution.settings;
        let consumer = &resolution.consumer;
        let mut lines = vec![format!(
            "{} ({} {} {} {}, {})",
            self.reference,
            settings.os,
            settings.arch,
            settings.compiler,
            settings.compiler_version,
            resolution.target.link
        )];

        lines.push("definitions:".to_string());
        lines.extend(
            resolution
                .definitions
                .iter()
                .map(|(key, value)| format!("  {key} = {value}")),
        );

        let kind = if self.multi_config { "multi-config" } else { "single-config" };
        lines.push(format!("build plan ({kind}):"));
        for (index, planned) in self.build_plan.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, planned.step));
        }

        lines.push("copy rules:".to_string());
        for rule in &self.copy_rules {
            let mut flags = Vec::new();
            if rule.keep_path {
                flags.push("keep path");
            }
            if rule.symlinks {
                flags.push("symlinks");
            }
            if rule.required {
                flags.push("required");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };
            lines.push(format!(
                "  {} {} -> {}{flags}",
                rule.pattern,
                rule.src.display(),
                rule.dst.display()
            ));
        }

        lines.push(format!("ssl: {}", resolution.ssl.module()));
        lines.push(format!("libraries: {}", join(consumer.libraries.iter().map(|lib| lib.name.as_str()))));
        lines.push(format!("debug libs: {}", join(consumer.debug_libs.iter().map(String::as_str))));
        lines.push(format!("release libs: {}", join(consumer.release_libs.iter().map(String::as_str))));
        lines.push(format!("system libs: {}", join(consumer.system_libs.iter().map(String::as_str))));
        lines.push(format!("defines: {}", join(consumer.defines.iter().map(String::as_str))));
        lines
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(" ")
    }
}

/// Prints the resolution for the configured options and settings.
///
/// # Errors
///
/// Returns an error if the settings are unsupported or JSON encoding fails.
pub fn run_resolve_command(args: &ResolveArgs, config: &Config) -> Result<()> {
    let resolution = resolve(&config.options, &config.settings).map_err(PackError::from)?;
    let source = config.paths.source().unwrap_or_else(|_| Path::new("<source>"));
    let build = config.paths.build().unwrap_or_else(|_| Path::new("<build>"));
    let generator = select_generator(config.cmake.generator.as_deref(), &config.settings)?;
    let multi_config = is_multi_config_generator(generator.as_deref());

    let report = ResolveReport::new(&resolution, multi_config, source, build);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.format() {
            println!("{line}");
        }
    }
    Ok(())
}
