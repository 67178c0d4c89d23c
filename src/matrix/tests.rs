// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{MatrixEntry, build_matrix, is_excluded};
use crate::config::types::MatrixConfig;
use crate::recipe::options::Options;
use crate::recipe::settings::{Arch, Compiler, Libcxx, Os, Runtime, Settings};

fn ids(entries: &[MatrixEntry]) -> String {
    entries
        .iter()
        .map(MatrixEntry::id)
        .collect::<Vec<_>>()
        .join("\n")
}

fn linux_gcc() -> Settings {
    Settings::for_compiler(Os::Linux, Arch::X86_64, Compiler::Gcc)
}

#[test]
fn test_exclusion_filter() {
    let mut settings = linux_gcc();
    settings.compiler_libcxx = Some(Libcxx::LibStdCxx);
    assert!(is_excluded(&settings));
    settings.compiler_libcxx = Some(Libcxx::LibStdCxx11);
    assert!(!is_excluded(&settings));

    let mut msvc = Settings::for_compiler(Os::Windows, Arch::X86_64, Compiler::VisualStudio);
    for (runtime, excluded) in [
        (Runtime::MT, true),
        (Runtime::MTd, true),
        (Runtime::MD, false),
        (Runtime::MDd, false),
    ] {
        msvc.compiler_runtime = Some(runtime);
        assert_eq!(is_excluded(&msvc), excluded, "{runtime}");
    }
}

#[test]
fn test_matrix_falls_back_to_settings() {
    let entries = build_matrix(&MatrixConfig::default(), &linux_gcc());
    insta::assert_snapshot!(ids(&entries), @r"
    gcc-9-x86_64-libstdc++11-static
    gcc-9-x86_64-libstdc++11-shared
    ");
}

#[test]
fn test_matrix_gcc_and_clang() {
    let matrix = MatrixConfig {
        archs: vec![Arch::X86, Arch::X86_64],
        gcc_versions: vec!["7".to_string(), "9".to_string()],
        clang_versions: vec!["10".to_string()],
        ..MatrixConfig::default()
    };
    let entries = build_matrix(&matrix, &linux_gcc());

    insta::assert_snapshot!(ids(&entries), @r"
    gcc-7-x86-libstdc++11-static
    gcc-7-x86-libstdc++11-shared
    gcc-7-x86_64-libstdc++11-static
    gcc-7-x86_64-libstdc++11-shared
    gcc-9-x86-libstdc++11-static
    gcc-9-x86-libstdc++11-shared
    gcc-9-x86_64-libstdc++11-static
    gcc-9-x86_64-libstdc++11-shared
    clang-10-x86-libstdc++11-static
    clang-10-x86-libstdc++11-shared
    clang-10-x86-libc++-static
    clang-10-x86-libc++-shared
    clang-10-x86_64-libstdc++11-static
    clang-10-x86_64-libstdc++11-shared
    clang-10-x86_64-libc++-static
    clang-10-x86_64-libc++-shared
    ");
    assert!(entries.iter().all(|entry| entry.settings.os == Os::Linux));
}

#[test]
fn test_matrix_visual_studio_keeps_dynamic_runtimes() {
    let matrix = MatrixConfig {
        visual_versions: vec!["15".to_string()],
        ..MatrixConfig::default()
    };
    let entries = build_matrix(&matrix, &linux_gcc());

    insta::assert_snapshot!(ids(&entries), @r"
    msvc-15-x86_64-MD-static
    msvc-15-x86_64-MD-shared
    msvc-15-x86_64-MDd-static
    msvc-15-x86_64-MDd-shared
    ");
    assert!(entries.iter().all(|entry| entry.settings.os == Os::Windows));
    assert!(entries.iter().all(|entry| entry.settings.validate().is_ok()));
}

#[test]
fn test_matrix_apple_clang() {
    let matrix = MatrixConfig {
        archs: vec![Arch::Armv8],
        apple_clang_versions: vec!["11.0".to_string()],
        ..MatrixConfig::default()
    };
    let entries = build_matrix(&matrix, &linux_gcc());

    insta::assert_snapshot!(ids(&entries), @r"
    apple-clang-11.0-armv8-libc++-static
    apple-clang-11.0-armv8-libc++-shared
    ");
    assert!(entries.iter().all(|entry| entry.settings.os == Os::Macos));
}

#[test]
fn test_matrix_entry_options() {
    let entries = build_matrix(&MatrixConfig::default(), &linux_gcc());
    let base = Options::default();

    let shared: Vec<bool> = entries
        .iter()
        .map(|entry| entry.options(&base).expect("shared is a recipe option").shared())
        .collect();
    assert_eq!(shared, [false, true]);
}
