// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package layout: copy rules from the source and build trees.
//!
//! ```text
//! <source>/<module>/include/**/*.h  --> include/   (keep path)
//! <source>/LICENSE                  --> .          (required, top level only)
//! <build>/lib/*.lib, *.a            --> lib/
//! <build>/bin/*.dll                 --> bin/
//! <build>/lib/*.so*                 --> lib/       (symlinks kept)
//! <build>/lib/*.dylib*              --> lib/
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::options::{ENABLE_NETSSL_WIN, Options};
use super::settings::Os;

/// Modules whose public headers are always packaged.
pub const HEADER_MODULES: &[&str] = &[
    "CppUnit",
    "Crypto",
    "Data",
    "Data/MySQL",
    "Data/ODBC",
    "Data/SQLite",
    "Foundation",
    "JSON",
    "MongoDB",
    "Net",
    "Redis",
    "Util",
    "XML",
    "Zip",
];

/// Secure networking implementation whose headers are packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SslVariant {
    Windows,
    OpenSsl,
}

impl SslVariant {
    /// Exactly one variant is packaged: Windows SSL only when requested on Windows.
    #[must_use]
    pub fn select(options: &Options, os: Os) -> Self {
        match os {
            Os::Windows if options.enabled(ENABLE_NETSSL_WIN) => Self::Windows,
            Os::Windows | Os::Linux | Os::Macos | Os::FreeBsd => Self::OpenSsl,
        }
    }

    #[must_use]
    pub const fn module(self) -> &'static str {
        match self {
            Self::Windows => "NetSSL_Win",
            Self::OpenSsl => "NetSSL_OpenSSL",
        }
    }
}

/// One copy operation of the packaging step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyRule {
    /// Glob matched against file names.
    pub pattern: &'static str,
    /// Directory searched for matches.
    pub src: PathBuf,
    /// Search sub-directories of `src` too.
    pub recursive: bool,
    /// Destination relative to the package root.
    pub dst: PathBuf,
    /// Keep the path relative to `src` instead of flattening.
    pub keep_path: bool,
    /// Recreate symbolic links instead of copying their targets.
    pub symlinks: bool,
    /// Fail when nothing matches.
    pub required: bool,
}

impl CopyRule {
    fn flat(pattern: &'static str, src: PathBuf, dst: &str) -> Self {
        Self {
            pattern,
            src,
            recursive: true,
            dst: PathBuf::from(dst),
            keep_path: false,
            symlinks: false,
            required: false,
        }
    }
}

/// Header modules packaged for the given options and platform, in copy order.
#[must_use]
pub fn header_modules(options: &Options, os: Os) -> Vec<&'static str> {
    let mut modules = HEADER_MODULES.to_vec();
    modules.push(SslVariant::select(options, os).module());
    modules
}

/// Resolves the ordered copy rules.
#[must_use]
pub fn package_rules(options: &Options, os: Os, source_dir: &Path, build_dir: &Path) -> Vec<CopyRule> {
    let mut rules: Vec<CopyRule> = header_modules(options, os)
        .into_iter()
        .map(|module| CopyRule {
            pattern: "*.h",
            src: source_dir.join(module).join("include"),
            recursive: true,
            dst: PathBuf::from("include"),
            keep_path: true,
            symlinks: false,
            required: false,
        })
        .collect();

    rules.push(CopyRule {
        required: true,
        recursive: false,
        ..CopyRule::flat("LICENSE", source_dir.to_path_buf(), ".")
    });

    let lib_dir = build_dir.join("lib");
    let bin_dir = build_dir.join("bin");
    rules.push(CopyRule::flat("*.lib", lib_dir.clone(), "lib"));
    rules.push(CopyRule::flat("*.a", lib_dir.clone(), "lib"));
    rules.push(CopyRule::flat("*.dll", bin_dir, "bin"));
    rules.push(CopyRule {
        symlinks: true,
        ..CopyRule::flat("*.so*", lib_dir.clone(), "lib")
    });
    rules.push(CopyRule::flat("*.dylib*", lib_dir, "lib"));

    rules
}
