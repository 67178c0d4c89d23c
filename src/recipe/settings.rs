// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform and compiler settings.
//!
//! ```text
//! Settings { os, arch, compiler, compiler_version,
//!            compiler_runtime?, compiler_libcxx? }
//!        |  + Options::shared()
//!        v
//! Target { os, compiler, link }   <- every platform rule matches on this
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RecipeError;

/// Operating system the package is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    #[serde(rename = "FreeBSD")]
    FreeBsd,
}

impl Os {
    /// The operating system this binary runs on.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else if cfg!(target_os = "freebsd") {
            Self::FreeBsd
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::Linux => write!(f, "Linux"),
            Self::Macos => write!(f, "Macos"),
            Self::FreeBsd => write!(f, "FreeBSD"),
        }
    }
}

/// Target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "armv8")]
    Armv8,
}

impl Arch {
    /// The architecture this binary runs on.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(target_arch = "x86") {
            Self::X86
        } else if cfg!(target_arch = "aarch64") {
            Self::Armv8
        } else {
            Self::X86_64
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86 => write!(f, "x86"),
            Self::X86_64 => write!(f, "x86_64"),
            Self::Armv8 => write!(f, "armv8"),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compiler {
    #[serde(rename = "Visual Studio")]
    VisualStudio,
    #[serde(rename = "gcc")]
    Gcc,
    #[serde(rename = "clang")]
    Clang,
    #[serde(rename = "apple-clang")]
    AppleClang,
}

impl Compiler {
    /// The compiler conventionally used on an operating system.
    #[must_use]
    pub const fn default_for(os: Os) -> Self {
        match os {
            Os::Windows => Self::VisualStudio,
            Os::Linux => Self::Gcc,
            Os::Macos => Self::AppleClang,
            Os::FreeBsd => Self::Clang,
        }
    }

    /// Short identifier used in build identifiers.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::VisualStudio => "msvc",
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VisualStudio => write!(f, "Visual Studio"),
            Self::Gcc => write!(f, "gcc"),
            Self::Clang => write!(f, "clang"),
            Self::AppleClang => write!(f, "apple-clang"),
        }
    }
}

/// Visual Studio runtime library variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    MD,
    MDd,
    MT,
    MTd,
}

impl Runtime {
    /// Returns true for the statically linked runtimes (`MT`, `MTd`).
    #[must_use]
    pub const fn is_static(self) -> bool {
        match self {
            Self::MT | Self::MTd => true,
            Self::MD | Self::MDd => false,
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// C++ standard library flavour for gcc-family compilers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Libcxx {
    /// libstdc++ with the pre-C++11 ABI.
    #[serde(rename = "libstdc++")]
    LibStdCxx,
    /// libstdc++ with the C++11 ABI.
    #[serde(rename = "libstdc++11")]
    LibStdCxx11,
    #[serde(rename = "libc++")]
    LibCxx,
}

impl fmt::Display for Libcxx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibStdCxx => write!(f, "libstdc++"),
            Self::LibStdCxx11 => write!(f, "libstdc++11"),
            Self::LibCxx => write!(f, "libc++"),
        }
    }
}

/// Static or shared libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    Static,
    Shared,
}

impl LinkMode {
    #[must_use]
    pub const fn from_shared(shared: bool) -> Self {
        if shared { Self::Shared } else { Self::Static }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Shared => write!(f, "shared"),
        }
    }
}

/// Build environment settings. Read-only for an invocation.
///
/// Missing keys are filled from the operating system and compiler, so
/// `compiler = "Visual Studio"` alone yields runtime `MD` and no libcxx.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PartialSettings")]
pub struct Settings {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    pub compiler_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_runtime: Option<Runtime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_libcxx: Option<Libcxx>,
}

/// Settings as written in configuration, every key optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PartialSettings {
    os: Option<Os>,
    arch: Option<Arch>,
    compiler: Option<Compiler>,
    compiler_version: Option<String>,
    compiler_runtime: Option<Runtime>,
    compiler_libcxx: Option<Libcxx>,
}

impl From<PartialSettings> for Settings {
    fn from(partial: PartialSettings) -> Self {
        let os = partial.os.unwrap_or_else(Os::host);
        let compiler = partial.compiler.unwrap_or_else(|| Compiler::default_for(os));
        let defaults = Self::for_compiler(os, partial.arch.unwrap_or_else(Arch::host), compiler);
        Self {
            compiler_version: partial.compiler_version.unwrap_or(defaults.compiler_version),
            compiler_runtime: partial.compiler_runtime.or(defaults.compiler_runtime),
            compiler_libcxx: partial.compiler_libcxx.or(defaults.compiler_libcxx),
            ..defaults
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_host()
    }
}

impl Settings {
    /// Settings describing the machine this binary runs on.
    #[must_use]
    pub fn for_host() -> Self {
        PartialSettings::default().into()
    }

    /// Default settings for a compiler: a representative version, runtime
    /// `MD` for Visual Studio, and the compiler's usual C++ library.
    #[must_use]
    pub fn for_compiler(os: Os, arch: Arch, compiler: Compiler) -> Self {
        let (compiler_version, compiler_runtime, compiler_libcxx) = match compiler {
            Compiler::VisualStudio => ("15", Some(Runtime::MD), None),
            Compiler::Gcc => ("9", None, Some(Libcxx::LibStdCxx11)),
            Compiler::Clang => ("10", None, Some(Libcxx::LibCxx)),
            Compiler::AppleClang => ("10.0", None, Some(Libcxx::LibCxx)),
        };
        Self {
            os,
            arch,
            compiler,
            compiler_version: compiler_version.to_string(),
            compiler_runtime,
            compiler_libcxx,
        }
    }

    /// Checks that the compiler sub-settings fit the compiler and platform.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::UnsupportedSettings`] when Visual Studio is
    /// combined with a non-Windows platform, a runtime is given for a
    /// gcc-family compiler, or a libcxx is given for Visual Studio.
    pub fn validate(&self) -> Result<(), RecipeError> {
        let unsupported = |message: String| Err(RecipeError::UnsupportedSettings { message });
        match self.compiler {
            Compiler::VisualStudio => {
                if self.os != Os::Windows {
                    return unsupported(format!("compiler 'Visual Studio' requires os=Windows, got os={}", self.os));
                }
                if let Some(libcxx) = self.compiler_libcxx {
                    return unsupported(format!("compiler 'Visual Studio' has no libcxx setting, got '{libcxx}'"));
                }
            }
            Compiler::Gcc | Compiler::Clang | Compiler::AppleClang => {
                if let Some(runtime) = self.compiler_runtime {
                    return unsupported(format!(
                        "compiler '{}' has no runtime setting, got '{runtime}'",
                        self.compiler
                    ));
                }
            }
        }
        Ok(())
    }

    /// Combines these settings with the link mode into the rule selector.
    #[must_use]
    pub const fn target(&self, link: LinkMode) -> Target {
        Target {
            os: self.os,
            compiler: self.compiler,
            link,
        }
    }
}

/// Platform x compiler x link mode: the selector for every platform rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Target {
    pub os: Os,
    pub compiler: Compiler,
    pub link: LinkMode,
}
