// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BuildError, ConfigError, PackError, PackResult, PackageError, RecipeError, bail_out};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "source".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'source' in section '[paths]'");
}

#[test]
fn test_boxed_conversions() {
    let err: PackError = RecipeError::UnknownOption {
        name: "enable_foo".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"recipe error: unknown option 'enable_foo'");

    let err: PackError = BuildError::StepFailed {
        tool: "cmake".to_string(),
        step: "build (Debug)".to_string(),
        message: "exit code 2".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"build error: cmake build (Debug) failed: exit code 2");

    let err: PackError = PackageError::MissingLibrary {
        name: "PocoFoundationd".to_string(),
        dir: "/pkg/lib".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"package error: missing library 'PocoFoundationd' in /pkg/lib");
}

#[test]
fn test_bail_out() {
    insta::assert_snapshot!(bail_out("no way").to_string(), @"fatal error: no way");
}

#[test]
fn test_pack_error_size() {
    // Box<str> variant (Bailed) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<PackError>();
    assert!(size <= 24, "PackError is {size} bytes, expected <= 24");
}

#[test]
fn test_pack_result_size() {
    let size = std::mem::size_of::<PackResult<()>>();
    assert!(size <= 24, "PackResult<()> is {size} bytes, expected <= 24");
}
