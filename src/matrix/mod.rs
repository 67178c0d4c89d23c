// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build matrix: every settings combination to package.
//!
//! ```text
//! compilers (gcc, clang, apple-clang, Visual Studio) x versions
//!   x archs
//!   x libcxx (gcc family) | runtime (Visual Studio)
//!   x shared in {false, true}
//!   - libcxx == libstdc++  or  runtime == MT*
//! ```
//!
//! Empty `[matrix]` lists fall back to the compiler, version and arch
//! from `[settings]`.

use serde::Serialize;
use std::fmt;

use crate::config::types::MatrixConfig;
use crate::error::RecipeError;
use crate::recipe::options::{Options, SHARED};
use crate::recipe::settings::{Arch, Compiler, Libcxx, LinkMode, Os, Runtime, Settings};

const GCC_LIBCXX: [Libcxx; 2] = [Libcxx::LibStdCxx, Libcxx::LibStdCxx11];
const CLANG_LIBCXX: [Libcxx; 3] = [Libcxx::LibStdCxx, Libcxx::LibStdCxx11, Libcxx::LibCxx];
const APPLE_CLANG_LIBCXX: [Libcxx; 1] = [Libcxx::LibCxx];
const VISUAL_RUNTIMES: [Runtime; 4] = [Runtime::MT, Runtime::MD, Runtime::MTd, Runtime::MDd];

/// One (settings, shared) combination of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub settings: Settings,
    pub shared: bool,
}

impl MatrixEntry {
    /// Stable identifier, also used as the entry's build and package
    /// sub-directory name.
    #[must_use]
    pub fn id(&self) -> String {
        let settings = &self.settings;
        let variant = settings
            .compiler_libcxx
            .map(|libcxx| libcxx.to_string())
            .or_else(|| settings.compiler_runtime.map(|runtime| runtime.to_string()))
            .unwrap_or_else(|| "default".to_string());
        format!(
            "{}-{}-{}-{}-{}",
            settings.compiler.short_name(),
            settings.compiler_version,
            settings.arch,
            variant,
            LinkMode::from_shared(self.shared)
        )
    }

    /// `base` with this entry's link mode.
    ///
    /// # Errors
    ///
    /// Never fails for the recipe's option table; the error type comes from
    /// [`Options::set`].
    pub fn options(&self, base: &Options) -> Result<Options, RecipeError> {
        let mut options = base.clone();
        options.set(SHARED, self.shared)?;
        Ok(options)
    }
}

impl fmt::Display for MatrixEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Whether the multi-packager filter drops these settings.
#[must_use]
pub fn is_excluded(settings: &Settings) -> bool {
    settings.compiler_libcxx == Some(Libcxx::LibStdCxx)
        || settings.compiler_runtime.is_some_and(Runtime::is_static)
}

/// Operating system a compiler's packages are built on.
const fn compiler_os(compiler: Compiler, base: Os) -> Os {
    match (compiler, base) {
        (Compiler::VisualStudio, _) => Os::Windows,
        (Compiler::AppleClang, _) => Os::Macos,
        (Compiler::Gcc | Compiler::Clang, Os::Linux | Os::FreeBsd) => base,
        (Compiler::Gcc | Compiler::Clang, Os::Windows | Os::Macos) => Os::Linux,
    }
}

fn variants(os: Os, arch: Arch, compiler: Compiler, version: &str) -> Vec<Settings> {
    let base = Settings {
        compiler_version: version.to_string(),
        ..Settings::for_compiler(os, arch, compiler)
    };
    let with_libcxx = |libcxx: &Libcxx| Settings {
        compiler_libcxx: Some(*libcxx),
        ..base.clone()
    };
    match compiler {
        Compiler::Gcc => GCC_LIBCXX.iter().map(with_libcxx).collect(),
        Compiler::Clang => CLANG_LIBCXX.iter().map(with_libcxx).collect(),
        Compiler::AppleClang => APPLE_CLANG_LIBCXX.iter().map(with_libcxx).collect(),
        Compiler::VisualStudio => VISUAL_RUNTIMES
            .iter()
            .map(|runtime| Settings {
                compiler_runtime: Some(*runtime),
                ..base.clone()
            })
            .collect(),
    }
}

/// Generates the matrix entries in a stable order.
#[must_use]
pub fn build_matrix(matrix: &MatrixConfig, base: &Settings) -> Vec<MatrixEntry> {
    let archs = if matrix.archs.is_empty() {
        vec![base.arch]
    } else {
        matrix.archs.clone()
    };

    let compilers: Vec<(Compiler, Vec<String>)> = if matrix.has_no_compilers() {
        vec![(base.compiler, vec![base.compiler_version.clone()])]
    } else {
        [
            (Compiler::Gcc, &matrix.gcc_versions),
            (Compiler::Clang, &matrix.clang_versions),
            (Compiler::AppleClang, &matrix.apple_clang_versions),
            (Compiler::VisualStudio, &matrix.visual_versions),
        ]
        .into_iter()
        .filter(|(_, versions)| !versions.is_empty())
        .map(|(compiler, versions)| (compiler, versions.clone()))
        .collect()
    };

    let mut entries = Vec::new();
    for (compiler, versions) in compilers {
        let os = compiler_os(compiler, base.os);
        for version in &versions {
            for &arch in &archs {
                for settings in variants(os, arch, compiler, version) {
                    if is_excluded(&settings) {
                        continue;
                    }
                    for shared in [false, true] {
                        entries.push(MatrixEntry {
                            settings: settings.clone(),
                            shared,
                        });
                    }
                }
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests;
