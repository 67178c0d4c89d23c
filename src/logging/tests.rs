// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{LogConfig, LogLevel};
use crate::config::Config;

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_snapshot!(filters.join(","), @"off,error,warn,info,debug,trace,trace");
}

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(6).is_ok());
    insta::assert_snapshot!(
        LogLevel::new(7).unwrap_err().to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
    assert!(LogLevel::from_u8(7).is_none());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_from_global_section() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 2
file_log_level = 4
log_file = "logs/pocopack.log"
"#,
    )
    .unwrap();

    let log_config = LogConfig::from(&config.global);
    assert_eq!(log_config.console_level(), LogLevel::WARN);
    assert_eq!(log_config.file_level(), LogLevel::DEBUG);
    assert_eq!(log_config.log_file(), Some(Path::new("logs/pocopack.log")));
}

#[test]
fn test_log_config_without_log_file() {
    let log_config = LogConfig::from(&Config::default().global);
    assert_eq!(log_config.console_level(), LogLevel::INFO);
    assert!(log_config.log_file().is_none());
}
