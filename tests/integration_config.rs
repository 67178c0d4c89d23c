// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::io::Write;
use std::path::Path;

use pocopack::config::Config;
use pocopack::matrix::build_matrix;
use pocopack::recipe::resolve;
use pocopack::recipe::settings::{Compiler, Os, Runtime};
use tempfile::NamedTempFile;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_windows_shared() {
    let toml = r#"
[options]
shared = true
enable_netssl_win = true

[settings]
os = "Windows"
compiler = "Visual Studio"
compiler_runtime = "MT"

[paths]
prefix = "C:/dev/poco-pkg"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.settings.os, Os::Windows);
    assert_eq!(config.settings.compiler, Compiler::VisualStudio);
    assert_eq!(config.settings.compiler_runtime, Some(Runtime::MT));
    assert_eq!(config.settings.compiler_libcxx, None);
    assert!(config.options.shared());
    assert_eq!(config.paths.source().unwrap(), Path::new("C:/dev/poco-pkg").join("poco"));

    let resolution = resolve(&config.options, &config.settings).unwrap();
    assert_eq!(resolution.ssl.module(), "NetSSL_Win");
    assert_eq!(resolution.definitions.get("POCO_STATIC"), Some("OFF"));
}

#[test]
fn config_parse_rejects_visual_studio_on_linux() {
    let toml = r#"
[settings]
os = "Linux"
compiler = "Visual Studio"
"#;
    let err = Config::parse(toml).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"recipe error: unsupported settings: compiler 'Visual Studio' requires os=Windows, got os=Linux"
    );
}

#[test]
fn config_parse_rejects_unknown_section() {
    assert!(Config::parse("[tasks]\nqt = true\n").is_err());
}

#[test]
fn config_matrix_section() {
    let toml = r#"
[settings]
os = "Linux"
compiler = "gcc"

[matrix]
archs = ["x86_64"]
gcc_versions = ["8"]
visual_versions = ["15"]
"#;
    let config = Config::parse(toml).unwrap();
    let ids: Vec<String> = build_matrix(&config.matrix, &config.settings)
        .iter()
        .map(ToString::to_string)
        .collect();

    insta::assert_snapshot!(ids.join("\n"), @r"
    gcc-8-x86_64-libstdc++11-static
    gcc-8-x86_64-libstdc++11-shared
    msvc-15-x86_64-MD-static
    msvc-15-x86_64-MD-shared
    msvc-15-x86_64-MDd-static
    msvc-15-x86_64-MDd-shared
    ");
}

// =============================================================================
// Layered files
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let mut base = NamedTempFile::new().unwrap();
    writeln!(base, "[options]\nenable_zip = false\nenable_pdf = true\n\n[cmake]\ngenerator = \"Ninja\"").unwrap();
    let mut local = NamedTempFile::new().unwrap();
    writeln!(local, "[options]\nenable_pdf = false").unwrap();

    let loader = Config::builder()
        .add_toml_file(base.path())
        .add_toml_file(local.path());
    assert_eq!(loader.format_loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert!(!config.options.enabled("enable_zip"));
    assert!(!config.options.enabled("enable_pdf"));
    assert_eq!(config.cmake.generator.as_deref(), Some("Ninja"));
}

#[test]
fn config_missing_required_file() {
    let err = Config::from_file("/nonexistent/pocopack.toml").unwrap_err();
    assert!(err.to_string().contains("failed to load configuration"));
}
