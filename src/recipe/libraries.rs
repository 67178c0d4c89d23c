// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Linkable libraries and consumer metadata.
//!
//! ```text
//! LIBRARY_TABLE (option-gated, link order)
//!   + PocoFoundation (always, last)
//!        |  Target { os, compiler, link }
//!        v
//! ConsumerInfo { libraries[debug, release], system_libs, defines }
//! ```

use serde::Serialize;

use super::options::{ENABLE_NETSSL_WIN, Options};
use super::settings::{Compiler, LinkMode, Os, Target};

/// Base library every package contains.
pub const FOUNDATION: &str = "PocoFoundation";

/// One optional library and the option that enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySpec {
    pub name: &'static str,
    pub option: &'static str,
}

const fn lib(name: &'static str, option: &'static str) -> LibrarySpec {
    LibrarySpec { name, option }
}

/// Optional libraries in link order.
pub const LIBRARY_TABLE: &[LibrarySpec] = &[
    lib("PocoMongoDB", "enable_mongodb"),
    lib("PocoPDF", "enable_pdf"),
    lib("PocoNet", "enable_net"),
    lib("PocoNetSSL", "enable_netssl"),
    lib("PocoNetSSLWin", ENABLE_NETSSL_WIN),
    lib("PocoCrypto", "enable_crypto"),
    lib("PocoData", "enable_data"),
    lib("PocoDataSQLite", "enable_data_sqlite"),
    lib("PocoDataMySQL", "enable_data_mysql"),
    lib("PocoDataODBC", "enable_data_odbc"),
    lib("PocoSevenZip", "enable_sevenzip"),
    lib("PocoZip", "enable_zip"),
    lib("PocoApacheConnector", "enable_apacheconnector"),
    lib("PocoUtil", "enable_util"),
    lib("PocoXML", "enable_xml"),
    lib("PocoJSON", "enable_json"),
    lib("PocoRedis", "enable_redis"),
];

/// (debug, release) suffix pair for a target.
#[must_use]
pub const fn suffixes(target: Target) -> (&'static str, &'static str) {
    match (target.compiler, target.link) {
        (Compiler::VisualStudio, LinkMode::Static) => ("mdd", "md"),
        (Compiler::VisualStudio, LinkMode::Shared)
        | (Compiler::Gcc | Compiler::Clang | Compiler::AppleClang, _) => ("d", ""),
    }
}

/// A library of the package with its per-configuration link names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageLibrary {
    pub name: String,
    pub debug: String,
    pub release: String,
}

impl PackageLibrary {
    #[must_use]
    pub fn new(name: &str, target: Target) -> Self {
        let (debug, release) = suffixes(target);
        Self {
            name: name.to_string(),
            debug: format!("{name}{debug}"),
            release: format!("{name}{release}"),
        }
    }
}

/// Returns whether a gated library is produced for an operating system.
fn library_available(spec: &LibrarySpec, os: Os) -> bool {
    match os {
        Os::Windows => true,
        Os::Linux | Os::Macos | Os::FreeBsd => spec.option != ENABLE_NETSSL_WIN,
    }
}

/// Enabled libraries in link order, `PocoFoundation` last.
#[must_use]
pub fn package_libraries(options: &Options, target: Target) -> Vec<PackageLibrary> {
    LIBRARY_TABLE
        .iter()
        .filter(|spec| options.enabled(spec.option) && library_available(spec, target.os))
        .map(|spec| spec.name)
        .chain(std::iter::once(FOUNDATION))
        .map(|name| PackageLibrary::new(name, target))
        .collect()
}

/// Platform libraries a consumer must link in addition to the package.
#[must_use]
pub fn system_libraries(target: Target) -> Vec<&'static str> {
    let mut libs = Vec::new();
    match target.os {
        Os::Linux => libs.extend(["pthread", "dl", "rt"]),
        Os::Windows | Os::Macos | Os::FreeBsd => {}
    }
    match (target.compiler, target.link) {
        (Compiler::VisualStudio, LinkMode::Static) => libs.extend(["ws2_32", "Iphlpapi", "Crypt32"]),
        (Compiler::VisualStudio, LinkMode::Shared)
        | (Compiler::Gcc | Compiler::Clang | Compiler::AppleClang, _) => {}
    }
    libs
}

/// Preprocessor defines a consumer must set.
#[must_use]
pub fn consumer_defines(target: Target) -> Vec<&'static str> {
    match target.link {
        LinkMode::Static => vec!["POCO_STATIC=ON", "POCO_NO_AUTOMATIC_LIBS"],
        LinkMode::Shared => Vec::new(),
    }
}

/// Everything a consumer needs to link against the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumerInfo {
    pub libraries: Vec<PackageLibrary>,
    pub debug_libs: Vec<String>,
    pub release_libs: Vec<String>,
    pub system_libs: Vec<String>,
    pub defines: Vec<String>,
}

impl ConsumerInfo {
    #[must_use]
    pub fn resolve(options: &Options, target: Target) -> Self {
        let libraries = package_libraries(options, target);
        let debug_libs = libraries.iter().map(|lib| lib.debug.clone()).collect();
        let release_libs = libraries.iter().map(|lib| lib.release.clone()).collect();
        Self {
            libraries,
            debug_libs,
            release_libs,
            system_libs: system_libraries(target).into_iter().map(String::from).collect(),
            defines: consumer_defines(target).into_iter().map(String::from).collect(),
        }
    }
}

/// Returns whether an artifact file name provides the given link name.
///
/// A leading `lib` and every extension are ignored, so `libPocoNetd.so.60`
/// and `PocoNetd.lib` both provide `PocoNetd`.
#[must_use]
pub fn artifact_provides(file_name: &str, link_name: &str) -> bool {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    stem == link_name || stem.strip_prefix("lib") == Some(link_name)
}
