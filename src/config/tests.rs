// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader, PathsConfig};
use crate::error::ConfigError;
use crate::recipe::settings::{Arch, Compiler, Libcxx, Os, Runtime};
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 3);
    assert!(config.cmake.parallel);
    assert!(config.cmake.generator.is_none());
    assert!(config.tools.cmake.as_os_str().is_empty());
    assert!(!config.options.shared());
    assert_eq!(config.settings.os, Os::host());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[options]
shared = true
enable_pdf = true

[settings]
os = "Linux"
compiler = "clang"
compiler_version = "11"

[paths]
prefix = "/test/path"
"#;

    let config = Config::parse(toml).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 4);
    assert!(config.options.shared());
    assert!(config.options.enabled("enable_pdf"));
    assert!(config.options.enabled("enable_net"), "unlisted options keep defaults");
    assert_eq!(config.settings.compiler, Compiler::Clang);
    assert_eq!(config.settings.compiler_version, "11");
    assert_eq!(config.settings.compiler_libcxx, Some(Libcxx::LibCxx));
    assert_eq!(config.paths.prefix, Some(PathBuf::from("/test/path")));
}

#[test]
fn test_settings_defaults_follow_compiler() {
    let config = Config::parse(
        r#"
[settings]
os = "Windows"
compiler = "Visual Studio"
"#,
    )
    .unwrap();
    assert_eq!(config.settings.compiler_runtime, Some(Runtime::MD));
    assert_eq!(config.settings.compiler_libcxx, None);
    assert_eq!(config.settings.compiler_version, "15");
}

#[test]
fn test_unsupported_settings_rejected() {
    let result = Config::parse(
        r#"
[settings]
os = "Linux"
compiler = "Visual Studio"
"#,
    );
    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("requires os=Windows"), "unexpected error: {err}");
}

#[test]
fn test_unknown_option_rejected() {
    let result = Config::parse("[options]\nenable_everything = true");
    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("enable_everything"), "unexpected error: {err}");
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let result = Config::parse("[tasks]\nfoo = 1");
    assert!(result.is_err());
}

#[test]
fn test_paths_resolve() {
    let mut paths = PathsConfig {
        prefix: Some(PathBuf::from("/test/prefix")),
        build: Some(PathBuf::from("out")),
        package: Some(PathBuf::from("/abs/pkg")),
        ..Default::default()
    };

    paths.resolve().unwrap();

    let normalize = |p: &std::path::Path| p.to_string_lossy().replace('\\', "/");
    insta::assert_snapshot!(
        [
            normalize(paths.source().unwrap()),
            normalize(paths.build().unwrap()),
            normalize(paths.package().unwrap()),
        ]
        .join("\n"),
        @r"
    /test/prefix/poco
    /test/prefix/out
    /abs/pkg
    "
    );
}

#[test]
fn test_paths_missing_prefix() {
    let mut paths = PathsConfig::default();
    let err = paths.resolve().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'prefix' in section '[paths]'");
    assert!(paths.build().is_err());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse(
        r#"
[global]
dry = true

[settings]
os = "Linux"
arch = "x86_64"
compiler = "gcc"

[matrix]
gcc_versions = ["9", "10"]
archs = ["x86_64"]
"#,
    )
    .unwrap();

    let result1 = config.format_options();
    let result2 = config.format_options();
    assert_eq!(result1, result2);

    let find = |key: &str| {
        result1
            .iter()
            .find(|line| line.starts_with(key))
            .map(|line| line.split(" = ").nth(1).unwrap_or_default().to_string())
    };
    assert_eq!(find("global.dry").as_deref(), Some("true"));
    assert_eq!(find("options.fPIC").as_deref(), Some("true"));
    assert_eq!(find("settings.compiler_libcxx").as_deref(), Some("libstdc++11"));
    assert_eq!(find("matrix.gcc_versions").as_deref(), Some("9, 10"));
    assert_eq!(find("matrix.archs").as_deref(), Some("x86_64"));
    assert!(find("settings.compiler_runtime").is_none());
}

// --- ConfigLoader Tests ---

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\n dry = true")
        .add_toml_file_optional("/nonexistent/optional.toml");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @"1. [string] <string>");
}

#[test]
fn test_config_loader_add_toml_file_success() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[global]
dry = true

[paths]
prefix = "/test/prefix"
"#
    )
    .expect("failed to write temp file");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .expect("build should succeed");

    assert!(config.global.dry);
    assert_eq!(config.paths.prefix, Some(PathBuf::from("/test/prefix")));
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file("/nonexistent/path/to/config.toml");
    assert!(loader.build().is_err());
}

#[test]
fn test_config_loader_add_toml_file_invalid_toml() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    let err = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .expect_err("build should fail with invalid TOML");

    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::ParseError { path, message }) => {
            let name = file.path().file_name().unwrap().to_string_lossy();
            assert!(path.ends_with(name.as_ref()), "unexpected path {path}");
            assert!(!message.is_empty());
        }
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_config_loader_invalid_toml_string() {
    let err = ConfigLoader::new()
        .add_toml_str("[options\nshared = true")
        .build()
        .expect_err("unterminated table header");

    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::ParseError { path, .. }) => assert_eq!(path, "<string>"),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable names are unique to this test.
    unsafe {
        std::env::set_var("POCOTEST_GLOBAL__DRY", "true");
        std::env::set_var("POCOTEST_OPTIONS__ENABLE_REDIS", "true");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[global]\n dry = false")
        .with_env_prefix("POCOTEST")
        .build()
        .expect("build should succeed");

    assert!(config.global.dry, "env var should override TOML value");
    assert!(config.options.enabled("enable_redis"));

    // SAFETY: Same as above
    unsafe {
        std::env::remove_var("POCOTEST_GLOBAL__DRY");
        std::env::remove_var("POCOTEST_OPTIONS__ENABLE_REDIS");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\n dry = false")
        .set("global.dry", true)
        .and_then(|loader| loader.set("options.enable_crypto", true))
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert!(config.global.dry, "set override should take effect");
    assert!(config.options.enabled("enable_crypto"));
}

#[test]
fn test_config_loader_set_path() {
    let config = ConfigLoader::new()
        .set_path("cmake/generator=Ninja Multi-Config")
        .and_then(|loader| loader.set_path("settings/arch=x86"))
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.cmake.generator.as_deref(), Some("Ninja Multi-Config"));
    assert_eq!(config.settings.arch, Arch::X86);

    let err = ConfigLoader::new().set_path("no-section=1").err().expect("invalid");
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'set' in section '[cli]': expected 'section/key=value', got 'no-section=1'"
    );
}

#[test]
fn test_config_loader_layered_sources() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[options]
enable_zip = false
enable_json = false

[cmake]
generator = "Ninja"
"#
    )
    .expect("failed to write");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .add_toml_str("[options]\nenable_json = true")
        .build()
        .expect("build should succeed");

    assert!(!config.options.enabled("enable_zip"), "file value should persist");
    assert!(config.options.enabled("enable_json"), "string should override file");
    assert_eq!(config.cmake.generator.as_deref(), Some("Ninja"));
}

#[test]
fn test_config_loader_build_deserialization_error() {
    let result = ConfigLoader::new()
        .add_toml_str("[global]\n dry = \"not a boolean\"")
        .build();

    let err_str = format!("{:#}", result.unwrap_err());
    assert!(
        err_str.contains("dry") || err_str.contains("invalid type"),
        "error should mention the problematic field: {err_str}"
    );
}
