// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `CMake` build tool.
//!
//! ```text
//! configure: cmake -S <source> -B <build> [-G gen] [-A arch] -DKEY=VALUE...
//! build:     cmake --build <build> [--config <type>] [--parallel]
//! generator: [cmake] generator, else Visual Studio <compiler_version>
//!            for compiler=Visual Studio, else CMake's default
//! -A:        every Visual Studio generator
//! multi-config: Visual Studio *, Xcode, Ninja Multi-Config
//!               (no generator: Windows hosts only)
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BuildContext, BuildTool};
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::error::{BuildError, ConfigError, Result};
use crate::recipe::definitions::Definitions;
use crate::recipe::plan::{BuildStep, BuildType};
use crate::recipe::settings::{Arch, Compiler, Settings};
use futures_util::future::BoxFuture;

const MULTI_CONFIG_GENERATORS: [&str; 2] = ["Xcode", "Ninja Multi-Config"];

fn is_visual_studio(generator: &str) -> bool {
    generator.starts_with("Visual Studio")
}

/// Whether a generator produces multi-configuration build trees.
///
/// Without an explicit generator CMake picks Visual Studio on Windows and
/// Makefiles everywhere else.
#[must_use]
pub fn is_multi_config_generator(generator: Option<&str>) -> bool {
    generator.map_or(cfg!(windows), |generator| {
        is_visual_studio(generator) || MULTI_CONFIG_GENERATORS.contains(&generator)
    })
}

/// Visual Studio generator for an MSVC `compiler_version`.
#[must_use]
pub fn visual_studio_generator(version: &str) -> Option<&'static str> {
    match version {
        "11" => Some("Visual Studio 11 2012"),
        "12" => Some("Visual Studio 12 2013"),
        "14" => Some("Visual Studio 14 2015"),
        "15" => Some("Visual Studio 15 2017"),
        "16" => Some("Visual Studio 16 2019"),
        "17" => Some("Visual Studio 17 2022"),
        _ => None,
    }
}

/// Generator for a build with `settings`.
///
/// A configured generator always wins. Otherwise Visual Studio builds get
/// the generator of their `compiler_version`, so the version and the `-A`
/// platform are never left to `CMake`'s defaults; other compilers get
/// `None`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a Visual Studio version without
/// a known generator.
pub fn select_generator(
    configured: Option<&str>,
    settings: &Settings,
) -> std::result::Result<Option<String>, ConfigError> {
    if let Some(generator) = configured {
        return Ok(Some(generator.to_string()));
    }
    match settings.compiler {
        Compiler::VisualStudio => visual_studio_generator(&settings.compiler_version)
            .map(|generator| Some(generator.to_string()))
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "settings".to_string(),
                key: "compiler_version".to_string(),
                message: format!(
                    "no Visual Studio generator for version '{}'; set cmake.generator",
                    settings.compiler_version
                ),
            }),
        Compiler::Gcc | Compiler::Clang | Compiler::AppleClang => Ok(None),
    }
}

/// Value of the `-A` platform flag for Visual Studio generators.
#[must_use]
pub const fn platform_name(arch: Arch) -> &'static str {
    match arch {
        Arch::X86 => "Win32",
        Arch::X86_64 => "x64",
        Arch::Armv8 => "ARM64",
    }
}

/// `CMake` tool bound to one source and build tree.
#[derive(Debug, Clone)]
pub struct CmakeTool {
    /// Explicit executable; looked up in `PATH` when unset.
    program: Option<PathBuf>,
    source_dir: PathBuf,
    build_dir: PathBuf,
    generator: Option<String>,
    arch: Arch,
    parallel: bool,
}

impl CmakeTool {
    #[must_use]
    pub fn new(source_dir: impl AsRef<Path>, build_dir: impl AsRef<Path>) -> Self {
        Self {
            program: None,
            source_dir: source_dir.as_ref().to_path_buf(),
            build_dir: build_dir.as_ref().to_path_buf(),
            generator: None,
            arch: Arch::host(),
            parallel: true,
        }
    }

    /// Creates a tool for `settings` from the `[cmake]` and `[tools]`
    /// configuration sections.
    ///
    /// # Errors
    ///
    /// Returns an error if no generator can be selected (see
    /// [`select_generator`]).
    pub fn from_context(
        ctx: &BuildContext,
        settings: &Settings,
        source_dir: impl AsRef<Path>,
        build_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let config = ctx.config();
        let mut tool = Self::new(source_dir, build_dir)
            .arch(settings.arch)
            .parallel(config.cmake.parallel);
        if let Some(generator) = select_generator(config.cmake.generator.as_deref(), settings)? {
            tool = tool.generator(generator);
        }
        if !config.tools.cmake.as_os_str().is_empty() {
            tool = tool.program(&config.tools.cmake);
        }
        Ok(tool)
    }

    #[must_use]
    pub fn program(mut self, path: impl AsRef<Path>) -> Self {
        self.program = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    #[must_use]
    pub const fn arch(mut self, arch: Arch) -> Self {
        self.arch = arch;
        self
    }

    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn cmake_builder(&self) -> Result<ProcessBuilder> {
        let builder = match self.program {
            Some(ref program) => ProcessBuilder::new(program),
            None => ProcessBuilder::which("cmake").context("cmake executable not found")?,
        };
        // stderr is kept so a failing step can report it
        Ok(builder.stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING))
    }

    /// Command line for a configure step.
    ///
    /// # Errors
    ///
    /// Returns an error if no `cmake` executable is configured or found.
    pub fn configure_command(&self, definitions: &Definitions) -> Result<ProcessBuilder> {
        let mut builder = self
            .cmake_builder()?
            .name("cmake")
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir);

        if let Some(ref generator) = self.generator {
            builder = builder.arg("-G").arg(generator);
            if is_visual_studio(generator) {
                builder = builder.arg("-A").arg(platform_name(self.arch));
            }
        }

        for (key, value) in definitions.iter() {
            builder = builder.arg(format!("-D{key}={value}"));
        }
        Ok(builder)
    }

    /// Command line for a build step.
    ///
    /// # Errors
    ///
    /// Returns an error if no `cmake` executable is configured or found.
    pub fn build_command(&self, build_type: BuildType) -> Result<ProcessBuilder> {
        let mut builder = self
            .cmake_builder()?
            .name("cmake")
            .arg("--build")
            .arg(&self.build_dir);

        if self.is_multi_config() {
            builder = builder.arg("--config").arg(build_type.as_str());
        }
        if self.parallel {
            builder = builder.arg("--parallel");
        }
        Ok(builder)
    }

    async fn execute(&self, ctx: &BuildContext, step: BuildStep, builder: ProcessBuilder) -> Result<()> {
        debug!(cmd = %builder.command_line(), "{step}");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| BuildError::StepFailed {
                tool: self.name().to_string(),
                step: step.to_string(),
                message: format!("{e:#}"),
            })?;

        if output.is_interrupted() {
            return Err(BuildError::Interrupted {
                tool: self.name().to_string(),
                step: step.to_string(),
            }
            .into());
        }

        info!("CMake {step} completed successfully");
        Ok(())
    }

    async fn do_configure(
        &self,
        ctx: &BuildContext,
        definitions: &Definitions,
        build_type: Option<BuildType>,
    ) -> Result<()> {
        let step = BuildStep::Configure(build_type);

        if ctx.is_dry_run() {
            info!(
                source = %self.source_dir.display(),
                build = %self.build_dir.display(),
                generator = self.generator.as_deref(),
                definitions = %definitions,
                "[dry-run] Would run CMake {step}"
            );
            return Ok(());
        }

        let builder = self.configure_command(definitions)?;
        self.execute(ctx, step, builder).await
    }

    async fn do_build(&self, ctx: &BuildContext, build_type: BuildType) -> Result<()> {
        let step = BuildStep::Build(build_type);

        if ctx.is_dry_run() {
            info!(
                build = %self.build_dir.display(),
                parallel = self.parallel,
                "[dry-run] Would run CMake {step}"
            );
            return Ok(());
        }

        let builder = self.build_command(build_type)?;
        self.execute(ctx, step, builder).await
    }
}

impl BuildTool for CmakeTool {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn is_multi_config(&self) -> bool {
        is_multi_config_generator(self.generator.as_deref())
    }

    fn configure<'a>(
        &'a self,
        ctx: &'a BuildContext,
        definitions: &'a Definitions,
        build_type: Option<BuildType>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_configure(ctx, definitions, build_type))
    }

    fn build<'a>(
        &'a self,
        ctx: &'a BuildContext,
        build_type: BuildType,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_build(ctx, build_type))
    }
}
